use geocoin_game::GridCell;
use yew::prelude::*;

use super::Button;
use crate::view_model::CacheRow;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub rows: Vec<CacheRow>,
    #[prop_or_default]
    pub on_collect: Callback<GridCell>,
    #[prop_or_default]
    pub on_deposit: Callback<GridCell>,
}

#[function_component(CacheList)]
pub fn cache_list(p: &Props) -> Html {
    if p.rows.is_empty() {
        return html! { <p class="caches empty">{ "No caches nearby" }</p> };
    }
    html! {
        <ul class="caches">
            { for p.rows.iter().map(|row| {
                let cell = row.cell;
                let on_collect = p.on_collect.reform(move |_: MouseEvent| cell);
                let on_deposit = p.on_deposit.reform(move |_: MouseEvent| cell);
                html! {
                    <li key={row.label.clone()}>
                        <span class="cache-label">{ row.label.clone() }</span>
                        <span class="cache-count">{ format!("{} coins", row.coin_count) }</span>
                        if let Some(coin) = &row.top_coin {
                            <span class="cache-top">{ format!("top {coin}") }</span>
                        }
                        <Button label="Collect" onclick={on_collect} disabled={!row.can_collect} />
                        <Button label="Deposit" onclick={on_deposit} disabled={!row.can_deposit} />
                    </li>
                }
            }) }
        </ul>
    }
}
