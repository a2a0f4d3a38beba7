//! Catalog filter form.
//!
//! Emits a flat key/value set. The free-text field submits on every
//! keystroke and relies on the controller's debounce to coalesce them.

use super::controller::CatalogController;
use crate::domain::a001_marca::api as marcas_api;
use crate::shared::components::error_box::ErrorBox;
use contracts::domain::a001_marca::Marca;
use contracts::domain::a003_producto::especificaciones::{schema, TIPO_VALVULA};
use contracts::domain::a003_producto::TipoProducto;
use contracts::domain::common::Choice;
use contracts::shared::catalog_query::FilterSet;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Valve measures offered as `<key>_min` / `<key>_max` ranges.
pub const RANGE_KEYS: [&str; 3] = ["diametro_cabeza", "diametro_vastago", "largo_total"];

fn range_label(key: &str) -> &'static str {
    schema(TipoProducto::Valvula)
        .iter()
        .find(|f| f.key == key)
        .map(|f| f.label)
        .unwrap_or("")
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterFormValues {
    pub search: String,
    pub marca: String,
    pub tipo: String,
    pub tipo_producto: String,
    /// `(key, min, max)` in [`RANGE_KEYS`] order.
    pub ranges: Vec<(&'static str, String, String)>,
    pub stock_bajo: bool,
}

fn parse_bound(raw: &str, label: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.replace(',', ".")
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format!("{}: valor no numérico", label))
}

impl FilterFormValues {
    pub fn from_filters(filters: &FilterSet) -> Self {
        let get = |k: &str| filters.get(k).unwrap_or_default().to_string();
        Self {
            search: get("search"),
            marca: get("marca"),
            tipo: get("tipo"),
            tipo_producto: get("tipo_producto"),
            ranges: RANGE_KEYS
                .iter()
                .map(|k| (*k, get(&format!("{}_min", k)), get(&format!("{}_max", k))))
                .collect(),
            stock_bajo: filters.get("stock_bajo") == Some("true"),
        }
    }

    /// Validated filter set. A range whose minimum exceeds its maximum
    /// blocks submission.
    pub fn to_filters(&self) -> Result<FilterSet, String> {
        let mut pairs: Vec<(String, String)> = vec![
            ("search".into(), self.search.clone()),
            ("marca".into(), self.marca.clone()),
            ("tipo".into(), self.tipo.clone()),
            ("tipo_producto".into(), self.tipo_producto.clone()),
        ];
        for (key, min, max) in &self.ranges {
            let label = range_label(key);
            let lo = parse_bound(min, label)?;
            let hi = parse_bound(max, label)?;
            if let (Some(lo), Some(hi)) = (lo, hi) {
                if lo > hi {
                    return Err(format!("{}: el mínimo supera al máximo", label));
                }
            }
            pairs.push((format!("{}_min", key), min.replace(',', ".")));
            pairs.push((format!("{}_max", key), max.replace(',', ".")));
        }
        if self.stock_bajo {
            pairs.push(("stock_bajo".into(), "true".into()));
        }
        Ok(FilterSet::from_pairs(pairs))
    }
}

#[component]
pub fn FilterForm(
    controller: CatalogController,
    /// Offer the product type select; off when the page pins the type.
    #[prop(optional)]
    show_tipo_producto: bool,
) -> impl IntoView {
    let initial = FilterFormValues::from_filters(&controller.submitted_filters.get_untracked());

    let search = RwSignal::new(initial.search.clone());
    let marca = RwSignal::new(initial.marca.clone());
    let tipo = RwSignal::new(initial.tipo.clone());
    let tipo_producto = RwSignal::new(initial.tipo_producto.clone());
    let stock_bajo = RwSignal::new(initial.stock_bajo);
    let ranges = StoredValue::new(
        initial
            .ranges
            .iter()
            .map(|(k, min, max)| (*k, RwSignal::new(min.clone()), RwSignal::new(max.clone())))
            .collect::<Vec<_>>(),
    );
    let error = RwSignal::new(None::<String>);

    let marcas = RwSignal::new(Vec::<Marca>::new());
    spawn_local(async move {
        match marcas_api::list_marcas().await {
            Ok(list) => marcas.set(list),
            Err(e) => log::warn!("brand list failed: {}", e),
        }
    });

    let collect = move || FilterFormValues {
        search: search.get_untracked(),
        marca: marca.get_untracked(),
        tipo: tipo.get_untracked(),
        tipo_producto: tipo_producto.get_untracked(),
        ranges: ranges.with_value(|r| {
            r.iter()
                .map(|(k, min, max)| (*k, min.get_untracked(), max.get_untracked()))
                .collect()
        }),
        stock_bajo: stock_bajo.get_untracked(),
    };

    let submit = move || match collect().to_filters() {
        Ok(filters) => {
            error.set(None);
            controller.search(filters);
        }
        Err(msg) => error.set(Some(msg)),
    };

    // Live search: every keystroke goes through the debounce.
    Effect::new(move |prev: Option<()>| {
        search.track();
        if prev.is_some() {
            submit();
        }
    });

    let clear = move |_| {
        search.set(String::new());
        marca.set(String::new());
        tipo.set(String::new());
        tipo_producto.set(String::new());
        stock_bajo.set(false);
        ranges.with_value(|r| {
            for (_, min, max) in r {
                min.set(String::new());
                max.set(String::new());
            }
        });
        error.set(None);
        controller.search(FilterSet::new());
    };

    view! {
        <form
            class="filter-form"
            on:submit=move |ev| {
                ev.prevent_default();
                submit();
            }
        >
            <Flex gap=FlexGap::Small align=FlexAlign::End attr:style="flex-wrap: wrap;">
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Buscar"</Label>
                    <Input value=search placeholder="Código, descripción, número de parte..." />
                </Flex>

                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Marca"</Label>
                    <Select value=marca size=SelectSize::Small>
                        <option value="">"Todas"</option>
                        <For
                            each=move || marcas.get()
                            key=|m| m.id
                            children=move |m: Marca| view! {
                                <option value=m.id.to_string()>{m.nombre}</option>
                            }
                        />
                    </Select>
                </Flex>

                <Show when=move || show_tipo_producto>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Tipo de producto"</Label>
                        <Select value=tipo_producto size=SelectSize::Small>
                            <option value="">"Todos"</option>
                            {TipoProducto::all()
                                .iter()
                                .map(|t| view! { <option value=t.code()>{t.label()}</option> })
                                .collect_view()}
                        </Select>
                    </Flex>
                </Show>

                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Tipo de válvula"</Label>
                    <Select value=tipo size=SelectSize::Small>
                        <option value="">"Todas"</option>
                        {TIPO_VALVULA
                            .iter()
                            .map(|(code, label)| view! { <option value=*code>{*label}</option> })
                            .collect_view()}
                    </Select>
                </Flex>

                {ranges.get_value().into_iter().map(|(key, min, max)| view! {
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>{range_label(key)}</Label>
                        <Flex gap=FlexGap::Small>
                            <Input value=min placeholder="mín" attr:style="width: 80px;" />
                            <Input value=max placeholder="máx" attr:style="width: 80px;" />
                        </Flex>
                    </Flex>
                }).collect_view()}

                <Checkbox checked=stock_bajo label="Stock bajo" />

                <Button appearance=ButtonAppearance::Primary attr:r#type="submit">
                    "Filtrar"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=clear>
                    "Limpiar"
                </Button>
            </Flex>
            <ErrorBox error=error />
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FilterFormValues {
        FilterFormValues::from_filters(&FilterSet::new())
    }

    #[test]
    fn test_empty_form_gives_empty_set() {
        assert!(form().to_filters().unwrap().is_empty());
    }

    #[test]
    fn test_values_are_trimmed_and_empty_dropped() {
        let mut f = form();
        f.search = "  TRW ".into();
        f.tipo = "INTAKE".into();
        f.ranges[0].1 = "30,5".into();
        let set = f.to_filters().unwrap();
        assert_eq!(set.get("search"), Some("TRW"));
        assert_eq!(set.get("tipo"), Some("INTAKE"));
        assert_eq!(set.get("diametro_cabeza_min"), Some("30.5"));
        assert!(!set.contains_key("diametro_cabeza_max"));
        assert!(!set.contains_key("marca"));
        assert!(!set.contains_key("stock_bajo"));
    }

    #[test]
    fn test_inverted_range_blocks_submit() {
        let mut f = form();
        f.ranges[2].1 = "120".into();
        f.ranges[2].2 = "90".into();
        let err = f.to_filters().unwrap_err();
        assert!(err.contains("Largo total"));
    }

    #[test]
    fn test_non_numeric_bound_rejected() {
        let mut f = form();
        f.ranges[1].2 = "siete".into();
        assert!(f.to_filters().is_err());
    }

    #[test]
    fn test_round_trip_through_filter_set() {
        let mut f = form();
        f.marca = "4".into();
        f.stock_bajo = true;
        f.ranges[0].1 = "30".into();
        f.ranges[0].2 = "40".into();
        let set = f.to_filters().unwrap();
        assert_eq!(FilterFormValues::from_filters(&set), f);
    }
}
