//! Main module for the session walkthrough using Yew.
//! Wires the session, widgets and datasets into a single page.

use gloo_timers::future::TimeoutFuture;
use session_walkthrough::{
    cache::{clear_data_cache, data_cache_len, is_cached},
    chart::{ChartKind, ChartSpec},
    load_pickup_data, load_secrets, linear_plot_demo, quadratic_demo, random_array,
    reset_session_data, session_meow_data,
    pickups::{filter_by_hour, hourly_histogram, Pickup},
    progress::{run_with_progress_async, ProgressUpdate, TaskStatus},
    session::{reload_counter, SessionHandle},
    utils::{format_range, next_option, ordered_range, square, validate_numeric_input},
};
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

mod components;
mod hooks;

use components::{
    render_pickups, Chart, Checkbox, DataTable, ErrorBlock, Expander, ProgressBar, RadioGroup,
    SelectBox, Slider,
};
use hooks::{use_session, use_session_value, use_validated_input};
use session_walkthrough::config::*;

// Rows of raw pickup data shown in the expander.
const RAW_PICKUP_PREVIEW: usize = 100;

#[derive(Properties, PartialEq)]
struct HeaderProps {
    reload_count: u64,
    on_reload: Callback<()>,
}

/// Page title, Reload button, render-pass counter and the secret lookup.
#[function_component(Header)]
fn header(props: &HeaderProps) -> Html {
    let secret = match load_secrets() {
        Ok(secrets) => secrets.get(SECRET_KEY).map(str::to_string).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    html! {
        <>
            <h1>{ "Experimenting with session state" }</h1>
            <button class="btn-primary" onclick={props.on_reload.reform(|_: MouseEvent| ())}>
                { "Reload" }
            </button>
            <p>{ format!("We've reloaded {} times", props.reload_count) }</p>
            <p>
                <em>{ "Retrieve a secret: " }</em>
                {
                    match secret {
                        Ok(value) => html! { <code>{ value }</code> },
                        Err(e) => html! { <ErrorBlock message={e} /> },
                    }
                }
            </p>
            <hr />
        </>
    }
}

#[derive(Properties, PartialEq)]
struct MeowSectionProps {
    /// Changes on every page render so a reset slot is picked up.
    render_pass: u64,
}

/// Session-cached meow data with tables and charts.
#[function_component(MeowSection)]
fn meow_section(_props: &MeowSectionProps) -> Html {
    let session = use_session();
    let meow = session.with(session_meow_data);

    let charts = use_memo(meow.clone(), |table| {
        [ChartKind::Bar, ChartKind::Line, ChartKind::Scatter].map(|kind| {
            Rc::new(ChartSpec::from_table(table, kind).with_axis_labels("Hour", "Meows"))
        })
    });

    html! {
        <section>
            <h2>{ "Meow Data" }</h2>
            <Expander title="Expand data and plots...">
                <div class="columns">
                    <div class="column">
                        <p>{ "Write array as interactive dataframe..." }</p>
                        <DataTable table={meow.clone()} interactive=true />
                    </div>
                    <div class="column">
                        <p>{ "Highlighting the max of each column..." }</p>
                        <DataTable table={meow.clone()} interactive=true highlight_max=true />
                    </div>
                </div>
                <p>{ "Write static table..." }</p>
                <DataTable table={meow.clone()} />
                <Chart id="meow-bar" spec={charts[0].clone()} />
                <Chart id="meow-line" spec={charts[1].clone()} />
                <Chart id="meow-scatter" spec={charts[2].clone()} />
            </Expander>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ArraySectionProps {
    render_pass: u64,
}

/// Random array regenerated on every render.
#[function_component(ArraySection)]
fn array_section(_props: &ArraySectionProps) -> Html {
    let session = use_session();
    let show_chart = use_state(|| false);
    let array = Rc::new(random_array());
    let spec = Rc::new(ChartSpec::from_table(&array, ChartKind::Line));

    html! {
        <section>
            <h2>{ "Random array" }</h2>
            <p>{ "This array is recreated with each page interaction." }</p>
            <DataTable table={array.clone()} interactive=true highlight_max=true />
            <DataTable table={array} />
            <Checkbox
                label="Show chart"
                checked={*show_chart}
                onchange={
                    let show_chart = show_chart.clone();
                    Callback::from(move |v: bool| {
                        show_chart.set(v);
                        session.request_rerun();
                    })
                }
            />
            if *show_chart {
                <Chart id="array-line" {spec} />
            }
        </section>
    }
}

/// Long-running task with a progress bar and status line.
#[function_component(ProgressSection)]
fn progress_section() -> Html {
    let session = use_session();
    let status = use_state(TaskStatus::default);
    let update = use_state(|| None::<ProgressUpdate>);

    let on_start = {
        let status = status.clone();
        let update = update.clone();
        Callback::from(move |_: MouseEvent| {
            if *status == TaskStatus::Running {
                return;
            }
            status.set(TaskStatus::Running);
            update.set(None);
            session.request_rerun();

            let status = status.clone();
            let update = update.clone();
            wasm_bindgen_futures::spawn_local(async move {
                run_with_progress_async(
                    PROGRESS_STEPS,
                    |u| update.set(Some(u)),
                    || TimeoutFuture::new(PROGRESS_INTERVAL_MS),
                )
                .await;
                status.set(TaskStatus::Done);
            });
        })
    };

    html! {
        <section>
            <h2>{ "Progress bars" }</h2>
            <p class="status">{ status.to_string() }</p>
            <button class="btn-secondary"
                disabled={*status == TaskStatus::Running}
                onclick={on_start}
            >
                { "Start long process" }
            </button>
            if *status != TaskStatus::NotStarted {
                <ProgressBar update={*update} />
            }
        </section>
    }
}

/// Radio whose value lives in the session, advanced by a button.
#[function_component(AdvanceOption)]
fn advance_option() -> Html {
    let option = use_session_value(RADIO_OPTION_KEY, RADIO_OPTIONS[0].to_string());
    let selected = RADIO_OPTIONS
        .iter()
        .position(|o| *o == option.value)
        .unwrap_or(0);

    let on_advance = {
        let option = option.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(next) = next_option(RADIO_OPTIONS, &option.value) {
                option.set.emit(next.to_string());
            }
        })
    };

    html! {
        <section>
            <RadioGroup
                name="radio_option"
                label={Some(AttrValue::from("Pick an option"))}
                options={RADIO_OPTIONS}
                {selected}
                onchange={
                    let set = option.set.clone();
                    Callback::from(move |i: usize| set.emit(RADIO_OPTIONS[i].to_string()))
                }
            />
            <button class="btn-secondary" onclick={on_advance}>{ "Advance Option" }</button>
        </section>
    }
}

/// Loads the pickup sample and hands it to the explorer.
#[function_component(PickupsSection)]
fn pickups_section() -> Html {
    let was_cached = is_cached("load_pickup_data", PICKUP_ROWS);
    let body = match load_pickup_data(PICKUP_ROWS) {
        Ok(pickups) => {
            let load_state = if was_cached {
                "Done! (using cache_data)".to_string()
            } else {
                format!("Done! Loaded {} rows", pickups.len())
            };
            html! {
                <>
                    <h3>{ "Data Load" }</h3>
                    <p>{ load_state }</p>
                    <PickupExplorer {pickups} />
                </>
            }
        }
        Err(e) => html! { <ErrorBlock message={e.to_string()} /> },
    };

    html! {
        <section>
            <h2>{ "Pickups in NYC" }</h2>
            { body }
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct PickupExplorerProps {
    pickups: Rc<Vec<Pickup>>,
}

/// Histogram by hour, maps, and the hour filter.
#[function_component(PickupExplorer)]
fn pickup_explorer(props: &PickupExplorerProps) -> Html {
    let session = use_session();
    let hour = use_validated_input(
        DEFAULT_PICKUP_HOUR,
        Rc::new(|s: &str| validate_numeric_input(s, Some(0), Some(MAX_HOUR), "Hour")),
    );
    let histogram = use_memo(props.pickups.clone(), |p| {
        Rc::new(ChartSpec::histogram(&hourly_histogram(p), "Pickups"))
    });
    let map = use_memo(props.pickups.clone(), |p| Rc::new(ChartSpec::map(p)));
    let filtered = filter_by_hour(&props.pickups, hour.value);

    let commit = {
        let on_commit = hour.on_commit.clone();
        let session = session.clone();
        Callback::from(move |_: ()| {
            on_commit.emit(());
            session.request_rerun();
        })
    };
    let on_enter = {
        let commit = commit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                commit.emit(());
            }
        })
    };

    html! {
        <>
            <h3>{ "Raw Data" }</h3>
            <Expander title="Expand raw data">
                { render_pickups(&props.pickups, RAW_PICKUP_PREVIEW) }
            </Expander>

            <h3>{ "Number of pickups by hour" }</h3>
            <Chart id="pickups-histogram" spec={(*histogram).clone()} />

            <h3>{ "Map of all pickups" }</h3>
            <Chart id="pickups-map" spec={(*map).clone()} />

            <h3>{ format!("Map of all pickups at {}:00", hour.value) }</h3>
            <Slider
                label="hour"
                min={0.0}
                max={f64::from(MAX_HOUR)}
                value={f64::from(hour.value)}
                oninput={
                    let set_value = hour.set_value.clone();
                    Callback::from(move |v: f64| {
                        set_value.emit(v.round() as u32);
                        session.request_rerun();
                    })
                }
            />
            <input
                type="number"
                class={if hour.error.is_some() { "invalid" } else { "" }}
                value={hour.text.clone()}
                oninput={hour.on_text_input.clone()}
                onchange={commit.reform(|_: Event| ())}
                onkeydown={on_enter}
            />
            if let Some(err) = hour.error.clone() {
                <div class="input-error">{ err }</div>
            }
            {
                match filtered {
                    Ok(rows) => html! {
                        <Chart id="pickups-hour-map" spec={Rc::new(ChartSpec::map(&rows))} />
                    },
                    Err(e) => html! { <ErrorBlock message={e.to_string()} /> },
                }
            }
        </>
    }
}

/// Primary page: sidebar controls plus the main panel.
#[function_component(Main)]
fn main_component() -> Html {
    let contact = use_state(|| 0usize);
    let range = use_state(|| DEFAULT_RANGE);
    let show_quadratic = use_state(|| true);
    let show_linear = use_state(|| false);
    let house = use_state(|| DEFAULT_HOUSE_INDEX);
    let x_val = use_state(|| 0i64);
    let name = use_session_value(NAME_KEY, String::new());
    let session = use_session();
    let trigger = use_force_update();

    // Widgets in child components re-run the whole page through the session.
    {
        let trigger = trigger.clone();
        use_effect_with(session.clone(), move |session| {
            session.set_rerun(move || trigger.force_update());
        });
    }

    // Every render of the page shell counts as a re-run.
    let reload_count = session.with(|s| reload_counter(s, RELOAD_COUNT_KEY));
    let on_reload = {
        let session = session.clone();
        let trigger = trigger.clone();
        Callback::from(move |_: ()| {
            session.with(reset_session_data);
            trigger.force_update();
        })
    };

    let quadratic = quadratic_demo();
    let linear = linear_plot_demo();
    let quadratic_spec = use_memo(quadratic.clone(), |t| {
        ChartSpec::from_columns(t, ChartKind::Line, "x", &["y"])
            .map(|s| Rc::new(s.with_axis_labels("x", "y")))
    });
    let linear_spec = use_memo(linear.clone(), |t| {
        ChartSpec::from_columns(t, ChartKind::Line, "index", &["first column", "second column"])
            .map(Rc::new)
    });

    let set_range_end = |low: bool| {
        let range = range.clone();
        Callback::from(move |v: f64| {
            let (lo, hi) = *range;
            range.set(if low { ordered_range(v, hi) } else { ordered_range(lo, v) });
        })
    };

    html! {
        <div class="layout">
            <aside class="sidebar">
                <h2>{ "Main page" }</h2>

                <h3>{ "Contact" }</h3>
                <SelectBox
                    label="How would you like to be contacted?"
                    options={CONTACT_OPTIONS}
                    selected={*contact}
                    onchange={
                        let contact = contact.clone();
                        Callback::from(move |i: usize| contact.set(i))
                    }
                />
                <p>{ format!("You selected: {}", CONTACT_OPTIONS[*contact]) }</p>

                <h3>{ "Range" }</h3>
                <Slider label="Select a range of values (low)"
                    min={RANGE_MIN} max={RANGE_MAX} value={range.0}
                    oninput={set_range_end(true)} />
                <Slider label="Select a range of values (high)"
                    min={RANGE_MIN} max={RANGE_MAX} value={range.1}
                    oninput={set_range_end(false)} />
                <p>{ format!("You selected: {}", format_range(*range)) }</p>

                <h3>{ "Charts" }</h3>
                <Checkbox
                    label="Show quadratic chart on main panel"
                    checked={*show_quadratic}
                    onchange={
                        let show = show_quadratic.clone();
                        Callback::from(move |v: bool| show.set(v))
                    }
                />
                <Checkbox
                    label="Show linear chart on main panel"
                    checked={*show_linear}
                    onchange={
                        let show = show_linear.clone();
                        Callback::from(move |v: bool| show.set(v))
                    }
                />

                <h3>{ "Sorting Hat" }</h3>
                <RadioGroup
                    name="sorting_hat"
                    options={HOUSES}
                    selected={*house}
                    onchange={
                        let house = house.clone();
                        Callback::from(move |i: usize| house.set(i))
                    }
                />
                <p>{ format!("You are in {} house!", HOUSES[*house]) }</p>

                <h3>{ "Cache" }</h3>
                <p class="cache-status">{ format!("Total entries in cache: {}", data_cache_len()) }</p>
                <button class="btn-secondary small"
                    onclick={
                        let trigger = trigger.clone();
                        Callback::from(move |_: MouseEvent| {
                            clear_data_cache();
                            trigger.force_update();
                        })
                    }
                >
                    { "Clear Cache" }
                </button>
            </aside>

            <main class="container">
                <Header {reload_count} {on_reload} />
                <MeowSection render_pass={reload_count} />

                <h2>{ "Demonstrating Plotting" }</h2>
                <Expander title="Expand charts" expanded=true>
                    if *show_quadratic {
                        <h4>{ "Quadratic" }</h4>
                        if let Some(spec) = (*quadratic_spec).clone() {
                            <Chart id="quadratic" {spec} />
                        }
                    }
                    if *show_linear {
                        <h4>{ "Linear Plot" }</h4>
                        if let Some(spec) = (*linear_spec).clone() {
                            <Chart id="linear" {spec} />
                        }
                    }
                </Expander>

                <hr />
                <h2>{ "Some Widgets" }</h2>
                <Slider
                    label="Slider for Squares!"
                    min={0.0}
                    max={SQUARE_SLIDER_MAX as f64}
                    value={*x_val as f64}
                    oninput={
                        let x_val = x_val.clone();
                        Callback::from(move |v: f64| x_val.set(v.round() as i64))
                    }
                />
                <p>{ format!("{} squared is {}", *x_val, square(*x_val)) }</p>

                <div class="form-group">
                    <label>{ "Your name" }</label>
                    <input type="text"
                        value={name.value.clone()}
                        oninput={
                            let set = name.set.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                set.emit(input.value());
                            })
                        }
                    />
                </div>
                <p>{ name.value.clone() }</p>

                <hr />
                <ProgressSection />
                <AdvanceOption />

                <hr />
                <ArraySection render_pass={reload_count} />
                <PickupsSection />
            </main>
        </div>
    }
}

/// App wrapper owning the session for this page load.
#[function_component]
pub fn App() -> Html {
    let session = use_memo((), |_| SessionHandle::new());
    html! {
        <ContextProvider<SessionHandle> context={(*session).clone()}>
            <Main />
        </ContextProvider<SessionHandle>>
    }
}

/// Entry point: initializes Yew renderer for the App component.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
