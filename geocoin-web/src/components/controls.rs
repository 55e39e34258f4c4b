use geocoin_game::Direction;
use yew::prelude::*;

use super::Button;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Direction of the running auto-move, if any.
    #[prop_or_default]
    pub auto_direction: Option<Direction>,
    #[prop_or_default]
    pub on_step: Callback<Direction>,
    #[prop_or_default]
    pub on_auto: Callback<Direction>,
    #[prop_or_default]
    pub on_stop: Callback<()>,
    #[prop_or_default]
    pub on_reset: Callback<()>,
}

fn title(direction: Direction) -> String {
    let name = direction.as_str();
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[function_component(Controls)]
pub fn controls(p: &Props) -> Html {
    let running = p.auto_direction;
    html! {
        <section class="controls">
            <div class="steps">
                { for Direction::ALL.iter().map(|&direction| html! {
                    <Button
                        label={title(direction)}
                        onclick={p.on_step.reform(move |_: MouseEvent| direction)}
                    />
                }) }
            </div>
            <div class="auto">
                { for Direction::ALL.iter().map(|&direction| {
                    let active = running == Some(direction);
                    let onclick = if active {
                        p.on_stop.reform(|_: MouseEvent| ())
                    } else {
                        p.on_auto.reform(move |_: MouseEvent| direction)
                    };
                    html! {
                        <Button
                            label={format!("Auto {}", direction.as_str())}
                            {onclick}
                            pressed={Some(active)}
                        />
                    }
                }) }
            </div>
            <Button label="Reset game" onclick={p.on_reset.reform(|_: MouseEvent| ())} />
        </section>
    }
}
