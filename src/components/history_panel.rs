use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HistoryPanelProps {
    /// Number of committed states, the original included.
    pub len: usize,
    pub position: Option<usize>,
}

#[function_component]
pub fn HistoryPanel(props: &HistoryPanelProps) -> Html {
    if props.len == 0 {
        return html! {};
    }
    html! {<div style="display:flex; gap:4px; align-items:center; font-size:11px; flex-wrap:wrap;">
        <span style="opacity:0.7; margin-right:4px;">{"History"}</span>
        { for (0..props.len).map(|i| {
            let current = props.position == Some(i);
            let ahead = props.position.map(|p| i > p).unwrap_or(false);
            let style = format!(
                "min-width:22px; padding:2px 4px; text-align:center; border-radius:4px; border:1px solid #30363d; {}{}",
                if current { "background:#1f6feb; color:#fff;" } else { "" },
                if ahead { "opacity:0.4;" } else { "" },
            );
            let label = if i == 0 { "O".to_string() } else { i.to_string() };
            html! { <span key={i} {style}>{ label }</span> }
        }) }
    </div>}
}
