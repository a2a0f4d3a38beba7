use contracts::domain::common::Choice;
use leptos::prelude::*;
use thaw::*;

/// Tinted badge for an enumerated status; `color` maps each value.
#[component]
pub fn StatusBadge<C>(value: C, color: fn(&C) -> BadgeColor) -> impl IntoView
where
    C: Choice + Send + Sync + 'static,
{
    let c = color(&value);
    view! {
        <Badge appearance=BadgeAppearance::Tint color=c>
            {value.label()}
        </Badge>
    }
}
