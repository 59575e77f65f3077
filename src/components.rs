//! Pure Yew view components for the walkthrough page.
//!
//! These render from props only; state lives in `main.rs` and the session.

use session_walkthrough::chart::{destroy_chart, render_chart, ChartSpec};
use session_walkthrough::dataset::Table;
use session_walkthrough::pickups::Pickup;
use session_walkthrough::progress::ProgressUpdate;
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Format a cell the way the tables show numbers.
fn format_cell(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{:.4}", v)
    }
}

/// Renders a table, optionally highlighting the maximum of each column.
pub fn render_table(table: &Table, highlight_max: bool) -> Html {
    if table.rows.is_empty() {
        return html! { <p class="no-results-message">{ "Empty table" }</p> };
    }

    let maxima = if highlight_max {
        table.column_max_rows()
    } else {
        vec![None; table.columns.len()]
    };

    html! {
        <table class="data-table">
            <thead>
                <tr>
                    <th></th>
                    { table.columns.iter().map(|c| html! { <th>{ c.clone() }</th> }).collect::<Html>() }
                </tr>
            </thead>
            <tbody>
                { table.rows.iter().enumerate().map(|(r, row)| html! {
                    <tr>
                        <th>{ table.row_label(r) }</th>
                        { row.iter().enumerate().map(|(c, &v)| {
                            let class = if maxima[c] == Some(r) { "highlight-max" } else { "" };
                            html! { <td class={class}>{ format_cell(v) }</td> }
                        }).collect::<Html>() }
                    </tr>
                }).collect::<Html>() }
            </tbody>
        </table>
    }
}

/// Renders the first `limit` pickups as a table.
pub fn render_pickups(pickups: &[Pickup], limit: usize) -> Html {
    html! {
        <div class="dataframe">
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{ "date/time" }</th>
                        <th>{ "lat" }</th>
                        <th>{ "lon" }</th>
                        <th>{ "base" }</th>
                    </tr>
                </thead>
                <tbody>
                    { pickups.iter().take(limit).map(|p| html! {
                        <tr>
                            <td>{ p.time.to_string() }</td>
                            <td>{ format!("{:.4}", p.lat) }</td>
                            <td>{ format!("{:.4}", p.lon) }</td>
                            <td>{ p.base.clone() }</td>
                        </tr>
                    }).collect::<Html>() }
                </tbody>
            </table>
            <p class="caption">{ format!("Showing {} of {} rows", limit.min(pickups.len()), pickups.len()) }</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DataTableProps {
    pub table: Rc<Table>,
    #[prop_or_default]
    pub highlight_max: bool,
    /// Scrollable frame instead of a static table.
    #[prop_or_default]
    pub interactive: bool,
}

#[function_component(DataTable)]
pub fn data_table(props: &DataTableProps) -> Html {
    let body = render_table(&props.table, props.highlight_max);
    if props.interactive {
        html! { <div class="dataframe">{ body }</div> }
    } else {
        body
    }
}

#[derive(Properties, PartialEq)]
pub struct ChartProps {
    pub id: AttrValue,
    pub spec: Rc<ChartSpec>,
}

/// Canvas that redraws whenever its spec changes.
#[function_component(Chart)]
pub fn chart(props: &ChartProps) -> Html {
    {
        let id = props.id.clone();
        use_effect_with(props.spec.clone(), move |spec| {
            render_chart(&id, spec);
            move || destroy_chart(&id)
        });
    }

    html! {
        <div class="chart-section">
            <canvas id={props.id.clone()}></canvas>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
    pub update: Option<ProgressUpdate>,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let percent = props.update.map(|u| u.percent()).unwrap_or(0);
    html! {
        <div class="progress">
            if let Some(update) = props.update {
                <div class="progress-label">{ update.label() }</div>
            }
            <div class="progress-track">
                <div class="progress-fill" style={format!("width: {}%", percent)}></div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ExpanderProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub expanded: bool,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Expander)]
pub fn expander(props: &ExpanderProps) -> Html {
    html! {
        <details class="expander" open={props.expanded}>
            <summary>{ props.title.clone() }</summary>
            { props.children.clone() }
        </details>
    }
}

/// Slider over `[min, max]`.
#[derive(Properties, PartialEq)]
pub struct SliderProps {
    pub label: AttrValue,
    pub min: f64,
    pub max: f64,
    #[prop_or(1.0)]
    pub step: f64,
    pub value: f64,
    pub oninput: Callback<f64>,
}

#[function_component(Slider)]
pub fn slider(props: &SliderProps) -> Html {
    let oninput = {
        let cb = props.oninput.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(v) = input.value().parse::<f64>() {
                cb.emit(v);
            }
        })
    };

    html! {
        <div class="form-group">
            <label>{ props.label.clone() }</label>
            <div class="slider-with-value">
                <input type="range"
                    min={props.min.to_string()}
                    max={props.max.to_string()}
                    step={props.step.to_string()}
                    value={props.value.to_string()}
                    {oninput}
                />
                <span class="slider-value">{ props.value.to_string() }</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectBoxProps {
    pub label: AttrValue,
    pub options: &'static [&'static str],
    pub selected: usize,
    pub onchange: Callback<usize>,
}

#[function_component(SelectBox)]
pub fn select_box(props: &SelectBoxProps) -> Html {
    let onchange = {
        let cb = props.onchange.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(idx) = usize::try_from(select.selected_index()) {
                cb.emit(idx);
            }
        })
    };

    html! {
        <div class="form-group">
            <label>{ props.label.clone() }</label>
            <select {onchange}>
                { props.options.iter().enumerate().map(|(i, opt)| html! {
                    <option value={i.to_string()} selected={i == props.selected}>{ *opt }</option>
                }).collect::<Html>() }
            </select>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CheckboxProps {
    pub label: AttrValue,
    pub checked: bool,
    pub onchange: Callback<bool>,
}

#[function_component(Checkbox)]
pub fn checkbox(props: &CheckboxProps) -> Html {
    let onchange = {
        let cb = props.onchange.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit(input.checked());
        })
    };

    html! {
        <div class="form-group checkbox-group">
            <label>
                <input type="checkbox" checked={props.checked} {onchange} />
                { props.label.clone() }
            </label>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct RadioGroupProps {
    pub name: AttrValue,
    /// Hidden when `None`.
    #[prop_or_default]
    pub label: Option<AttrValue>,
    pub options: &'static [&'static str],
    pub selected: usize,
    pub onchange: Callback<usize>,
}

#[function_component(RadioGroup)]
pub fn radio_group(props: &RadioGroupProps) -> Html {
    html! {
        <div class="form-group radio-group">
            if let Some(label) = &props.label {
                <label>{ label.clone() }</label>
            }
            { props.options.iter().enumerate().map(|(i, opt)| {
                let cb = props.onchange.clone();
                html! {
                    <label class="radio-option">
                        <input type="radio"
                            name={props.name.clone()}
                            checked={i == props.selected}
                            onchange={Callback::from(move |_: Event| cb.emit(i))}
                        />
                        { *opt }
                    </label>
                }
            }).collect::<Html>() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorBlockProps {
    pub message: AttrValue,
}

#[function_component(ErrorBlock)]
pub fn error_block(props: &ErrorBlockProps) -> Html {
    html! { <div class="current-error">{ props.message.clone() }</div> }
}

#[cfg(test)]
mod tests {
    use super::format_cell;

    #[test]
    fn cells_drop_trailing_zeroes_for_integers() {
        assert_eq!(format_cell(16.0), "16");
        assert_eq!(format_cell(-3.0), "-3");
        assert_eq!(format_cell(0.12345), "0.1235");
        assert_eq!(format_cell(f64::NAN), "");
    }
}
