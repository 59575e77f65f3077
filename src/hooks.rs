use session_walkthrough::session::SessionHandle;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// The session provided by the nearest `ContextProvider<SessionHandle>`.
///
/// Outside a provider the component gets a session of its own that lives as
/// long as the component does.
#[hook]
pub fn use_session() -> SessionHandle {
    let fallback = use_memo((), |_| SessionHandle::new());
    use_context::<SessionHandle>().unwrap_or_else(|| (*fallback).clone())
}

/// A widget value stored in the session under `key`.
#[derive(Clone)]
pub struct SessionValue<T: Clone + 'static> {
    pub value: T,
    /// Store a new value and re-render.
    pub set: Callback<T>,
}

/// Keep a widget's value in the session so it outlives re-renders and can be
/// read or written by other logic under the same key. Setting it re-runs the
/// page.
#[hook]
pub fn use_session_value<T>(key: &'static str, default: T) -> SessionValue<T>
where
    T: Clone + 'static,
{
    let session = use_session();
    let trigger = use_force_update();
    let value = (*session.get_or_create(key, || default)).clone();

    let set = Callback::from(move |new_value: T| {
        session.set(key, new_value);
        trigger.force_update();
        session.request_rerun();
    });

    SessionValue { value, set }
}

/// Holds the state and callbacks for a validated input field.
#[derive(Clone)]
pub struct ValidatedInput<T: Clone + PartialEq + 'static> {
    /// The current text content of the input field.
    pub text: String,
    /// The last successfully parsed value.
    pub value: T,
    /// An optional error message if validation failed.
    pub error: Option<String>,
    /// Callback for the text input's `oninput` event.
    pub on_text_input: Callback<InputEvent>,
    /// Parse and validate the current text.
    /// Typically used with `onchange` or after an Enter key press.
    pub on_commit: Callback<()>,
    /// Set the value programmatically, e.g. from a slider.
    /// This also updates the text and clears any error.
    pub set_value: Callback<T>,
}

/// Custom hook to manage state for a validated input field.
#[hook]
pub fn use_validated_input<T>(
    initial_value: T,
    parse_and_validate: Rc<dyn Fn(&str) -> Result<T, String>>,
) -> ValidatedInput<T>
where
    T: Clone + PartialEq + std::fmt::Display + 'static,
{
    let value_handle = use_state(|| initial_value.clone());
    let text_handle = use_state(|| initial_value.to_string());
    let error_handle = use_state(|| None::<String>);

    let on_text_input = {
        let text_setter = text_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let on_commit = {
        let text_handle = text_handle.clone();
        let value_setter = value_handle.clone();
        let error_setter = error_handle.clone();
        Callback::from(move |_: ()| match parse_and_validate(text_handle.as_str()) {
            Ok(parsed) => {
                text_handle.set(parsed.to_string()); // canonical form
                value_setter.set(parsed);
                error_setter.set(None);
            }
            Err(msg) => error_setter.set(Some(msg)),
        })
    };

    let set_value = {
        let value_setter = value_handle.clone();
        let text_setter = text_handle.clone();
        let error_setter = error_handle.clone();
        Callback::from(move |new_val: T| {
            text_setter.set(new_val.to_string());
            value_setter.set(new_val);
            error_setter.set(None);
        })
    };

    ValidatedInput {
        text: (*text_handle).clone(),
        value: (*value_handle).clone(),
        error: (*error_handle).clone(),
        on_text_input,
        on_commit,
        set_value,
    }
}
