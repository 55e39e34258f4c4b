use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub label: AttrValue,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub pressed: Option<bool>,
}

#[function_component(Button)]
pub fn button(p: &Props) -> Html {
    let onclick = p.onclick.clone();
    let pressed = p.pressed.map(|on| AttrValue::from(on.to_string()));
    html! {
        <button type="button" {onclick} disabled={p.disabled} aria-pressed={pressed}>
            { p.label.clone() }
        </button>
    }
}
