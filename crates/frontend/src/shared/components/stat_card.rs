use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatTone {
    #[default]
    Neutral,
    Good,
    Warning,
    Bad,
}

impl StatTone {
    fn class(self) -> &'static str {
        match self {
            StatTone::Good => "stat-card stat-card--success",
            StatTone::Bad => "stat-card stat-card--error",
            StatTone::Warning => "stat-card stat-card--warning",
            StatTone::Neutral => "stat-card",
        }
    }

    /// Warning as soon as anything is waiting.
    pub fn for_backlog(count: u64) -> Self {
        if count == 0 {
            StatTone::Good
        } else {
            StatTone::Warning
        }
    }
}

/// KPI tile. `value` is already formatted; `None` renders a dash while
/// loading or after an error.
#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    icon_name: &'static str,
    #[prop(into)] value: Signal<Option<String>>,
    #[prop(optional, into)] tone: Signal<StatTone>,
    #[prop(optional, into)] subtitle: Signal<Option<String>>,
    #[prop(optional)] on_click: Option<Callback<()>>,
) -> impl IntoView {
    let class = move || {
        let base = tone.get().class();
        if on_click.is_some() {
            format!("{} stat-card--clickable", base)
        } else {
            base.to_string()
        }
    };

    view! {
        <div
            class=class
            on:click=move |_| {
                if let Some(cb) = on_click {
                    cb.run(());
                }
            }
        >
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {move || value.get().unwrap_or_else(|| "—".to_string())}
                </div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backlog_tone() {
        assert_eq!(StatTone::for_backlog(0), StatTone::Good);
        assert_eq!(StatTone::for_backlog(3), StatTone::Warning);
        assert_eq!(StatTone::Bad.class(), "stat-card stat-card--error");
    }
}
