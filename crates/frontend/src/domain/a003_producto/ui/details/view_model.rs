use crate::domain::a003_producto::api;
use crate::layout::notice_service::NoticeService;
use contracts::domain::a002_vehiculo::AplicacionDto;
use contracts::domain::a003_producto::especificaciones::{parse_input, schema, SpecKind};
use contracts::domain::a003_producto::{NumeroParteDto, Producto, ProductoDto, TipoProducto};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use web_sys::File;

/// Raw text of every schema field of `tipo`, taken from stored attributes.
pub fn spec_inputs_from(tipo: TipoProducto, values: &Map<String, Value>) -> BTreeMap<String, String> {
    schema(tipo)
        .iter()
        .map(|field| {
            let raw = match values.get(field.key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => String::new(),
            };
            (field.key.to_string(), raw)
        })
        .collect()
}

/// Attribute object for `tipo`. Keys outside the schema are dropped and
/// blank inputs are left out.
pub fn build_especificaciones(
    tipo: TipoProducto,
    inputs: &BTreeMap<String, String>,
) -> Result<Map<String, Value>, String> {
    let mut out = Map::new();
    for field in schema(tipo) {
        let raw = inputs.get(field.key).map(String::as_str).unwrap_or("");
        if let SpecKind::Choice(options) = field.kind {
            if !raw.is_empty() && !options.iter().any(|(code, _)| *code == raw) {
                return Err(format!("Valor '{}' inválido para {}", raw, field.label));
            }
        }
        if let Some(value) = parse_input(field, raw)? {
            out.insert(field.key.to_string(), value);
        }
    }
    Ok(out)
}

#[derive(Clone, Copy)]
pub struct ProductoDetailVm {
    pub id: RwSignal<Option<EntityId>>,
    pub form: RwSignal<ProductoDto>,
    /// Raw attribute inputs keyed by schema field.
    pub spec_inputs: RwSignal<BTreeMap<String, String>>,
    /// Last record returned by the API; holds the nested collections.
    pub record: RwSignal<Option<Producto>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    notices: NoticeService,
}

impl ProductoDetailVm {
    pub fn new(notices: NoticeService) -> Self {
        let form = ProductoDto::default();
        let spec_inputs = spec_inputs_from(form.tipo_producto, &form.especificaciones);
        Self {
            id: RwSignal::new(None),
            form: RwSignal::new(form),
            spec_inputs: RwSignal::new(spec_inputs),
            record: RwSignal::new(None),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            notices,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.with(Option::is_some)
    }

    fn apply_record(&self, producto: Producto) {
        let dto = ProductoDto::from(&producto);
        self.spec_inputs
            .set(spec_inputs_from(dto.tipo_producto, &dto.especificaciones));
        self.form.set(dto);
        self.id.set(Some(producto.id));
        self.record.set(Some(producto));
    }

    pub fn load(&self, id: EntityId) {
        let vm = *self;
        vm.loading.set(true);
        spawn_local(async move {
            match api::get_producto(id).await {
                Ok(p) => vm.apply_record(p),
                Err(e) => vm.error.set(Some(e.user_message())),
            }
            vm.loading.set(false);
        });
    }

    /// Switching type keeps the inputs the new schema shares with the old one.
    pub fn set_tipo(&self, tipo: TipoProducto) {
        let current = self.spec_inputs.get_untracked();
        let next = schema(tipo)
            .iter()
            .map(|f| {
                let raw = current.get(f.key).cloned().unwrap_or_default();
                (f.key.to_string(), raw)
            })
            .collect();
        self.spec_inputs.set(next);
        self.form.update(|f| f.tipo_producto = tipo);
    }

    pub fn set_spec_input(&self, key: &str, value: String) {
        self.spec_inputs.update(|m| {
            m.insert(key.to_string(), value);
        });
    }

    /// Asks the server for the next free code of the current type and brand.
    pub fn suggest_code(&self) {
        let vm = *self;
        let (tipo, marca) = self.form.with_untracked(|f| (f.tipo_producto, f.marca));
        spawn_local(async move {
            match api::sugerir_codigo(tipo, marca).await {
                Ok(codigo) => vm.form.update(|f| f.codigo = codigo),
                Err(e) => vm.notices.api_error(&e),
            }
        });
    }

    pub fn save(&self, on_saved: Callback<Producto>) {
        if self.saving.get_untracked() {
            return;
        }
        let tipo = self.form.with_untracked(|f| f.tipo_producto);
        let especificaciones =
            match self.spec_inputs.with_untracked(|m| build_especificaciones(tipo, m)) {
                Ok(map) => map,
                Err(msg) => {
                    self.error.set(Some(msg));
                    return;
                }
            };
        let mut dto = self.form.get_untracked();
        dto.especificaciones = especificaciones;

        let vm = *self;
        let id = self.id.get_untracked();
        vm.saving.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let result = match id {
                Some(id) => api::update_producto(id, &dto).await,
                None => api::create_producto(&dto).await,
            };
            match result {
                Ok(p) => {
                    vm.notices.success(format!("Producto {} guardado", p.codigo));
                    vm.apply_record(p.clone());
                    on_saved.run(p);
                }
                Err(e) => vm.error.set(Some(e.user_message())),
            }
            vm.saving.set(false);
        });
    }

    pub fn delete(&self, on_deleted: Callback<()>) {
        let Some(id) = self.id.get_untracked() else {
            return;
        };
        let vm = *self;
        spawn_local(async move {
            match api::delete_producto(id).await {
                Ok(()) => {
                    vm.notices.success("Producto eliminado");
                    on_deleted.run(());
                }
                Err(e) => vm.error.set(Some(e.user_message())),
            }
        });
    }

    /// Nested collections change server side; re-read the record afterwards.
    fn reload(&self) {
        if let Some(id) = self.id.get_untracked() {
            let vm = *self;
            spawn_local(async move {
                match api::get_producto(id).await {
                    Ok(p) => vm.record.set(Some(p)),
                    Err(e) => vm.notices.api_error(&e),
                }
            });
        }
    }

    pub fn upload_photo(&self, file: File) {
        let Some(id) = self.id.get_untracked() else {
            return;
        };
        let vm = *self;
        spawn_local(async move {
            match api::upload_foto(id, &file).await {
                Ok(_) => {
                    vm.notices.success("Foto subida");
                    vm.reload();
                }
                Err(e) => vm.notices.api_error(&e),
            }
        });
    }

    pub fn delete_photo(&self, foto: EntityId) {
        let vm = *self;
        spawn_local(async move {
            match api::delete_foto(foto).await {
                Ok(()) => vm.reload(),
                Err(e) => vm.notices.api_error(&e),
            }
        });
    }

    pub fn mark_main_photo(&self, foto: EntityId) {
        let vm = *self;
        spawn_local(async move {
            match api::marcar_principal(foto).await {
                Ok(_) => vm.reload(),
                Err(e) => vm.notices.api_error(&e),
            }
        });
    }

    pub fn add_part_number(&self, numero: String, fabricante: String) {
        let Some(producto) = self.id.get_untracked() else {
            return;
        };
        let dto = NumeroParteDto {
            producto,
            numero: numero.trim().to_string(),
            fabricante: Some(fabricante.trim().to_string()).filter(|f| !f.is_empty()),
        };
        let vm = *self;
        spawn_local(async move {
            match api::add_numero_parte(&dto).await {
                Ok(_) => vm.reload(),
                Err(e) => vm.notices.api_error(&e),
            }
        });
    }

    pub fn delete_part_number(&self, id: EntityId) {
        let vm = *self;
        spawn_local(async move {
            match api::delete_numero_parte(id).await {
                Ok(()) => vm.reload(),
                Err(e) => vm.notices.api_error(&e),
            }
        });
    }

    pub fn add_application(&self, vehiculo: EntityId, notas: String) {
        let Some(producto) = self.id.get_untracked() else {
            return;
        };
        let dto = AplicacionDto {
            producto,
            vehiculo,
            notas: Some(notas.trim().to_string()).filter(|n| !n.is_empty()),
        };
        let vm = *self;
        spawn_local(async move {
            match api::add_aplicacion(&dto).await {
                Ok(_) => vm.reload(),
                Err(e) => vm.notices.api_error(&e),
            }
        });
    }

    pub fn delete_application(&self, id: EntityId) {
        let vm = *self;
        spawn_local(async move {
            match api::delete_aplicacion(id).await {
                Ok(()) => vm.reload(),
                Err(e) => vm.notices.api_error(&e),
            }
        });
    }

    pub fn toggle_compatible(&self, valvula: EntityId) {
        self.form.update(|f| {
            if let Some(pos) = f.valvulas_compatibles.iter().position(|v| *v == valvula) {
                f.valvulas_compatibles.remove(pos);
            } else {
                f.valvulas_compatibles.push(valvula);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inputs_cover_schema() {
        let stored = json!({"tipo": "EXHAUST", "diametro_cabeza": 31.5, "extra": "x"});
        let inputs = spec_inputs_from(TipoProducto::Valvula, stored.as_object().unwrap());
        assert_eq!(inputs.get("tipo").map(String::as_str), Some("EXHAUST"));
        assert_eq!(inputs.get("diametro_cabeza").map(String::as_str), Some("31.5"));
        assert_eq!(inputs.get("largo_total").map(String::as_str), Some(""));
        assert!(!inputs.contains_key("extra"));
    }

    #[test]
    fn test_build_drops_blank_and_parses_numbers() {
        let mut inputs = BTreeMap::new();
        inputs.insert("tipo".to_string(), "INTAKE".to_string());
        inputs.insert("diametro_vastago".to_string(), "7,0".to_string());
        inputs.insert("largo_total".to_string(), "".to_string());
        let map = build_especificaciones(TipoProducto::Valvula, &inputs).unwrap();
        assert_eq!(map.get("tipo"), Some(&json!("INTAKE")));
        assert_eq!(map.get("diametro_vastago"), Some(&json!(7.0)));
        assert!(!map.contains_key("largo_total"));
    }

    #[test]
    fn test_build_rejects_bad_values() {
        let mut inputs = BTreeMap::new();
        inputs.insert("tipo".to_string(), "TURBO".to_string());
        assert!(build_especificaciones(TipoProducto::Valvula, &inputs).is_err());

        let mut inputs = BTreeMap::new();
        inputs.insert("altura".to_string(), "alto".to_string());
        assert!(build_especificaciones(TipoProducto::Filtro, &inputs).is_err());
    }

    #[test]
    fn test_other_type_has_no_attributes() {
        let mut inputs = BTreeMap::new();
        inputs.insert("rosca".to_string(), "M14".to_string());
        let map = build_especificaciones(TipoProducto::Otro, &inputs).unwrap();
        assert!(map.is_empty());
    }
}
