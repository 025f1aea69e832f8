//! Single-select dropdown component.
//!
//! The parent owns a `Dropdown`, places its `view` wherever it should
//! appear, routes `DropdownMsg`s back into `update`, and forwards whatever
//! message `update` returns. Clicks inside the widget stop propagation so
//! that a root-level click handler can send `Dismiss` for everything else.

use std::rc::Rc;

use sauron::{
    html::{attributes::*, *},
    prelude::*,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownMsg {
    /// An option row was clicked.
    Select(String),
    /// The trigger was clicked. Opens, never closes.
    Open,
    /// A click landed outside the widget.
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DropdownError {
    #[error("dropdown needs at least one option")]
    NoOptions,
    #[error("selected value {0:?} is not one of the options")]
    UnknownSelection(String),
}

#[derive(Clone)]
pub struct Dropdown<MSG> {
    options: Vec<DropdownOption>,
    selected: String,
    expanded: bool,
    on_change: Rc<dyn Fn(String) -> MSG>,
}

impl<MSG: 'static> Dropdown<MSG> {
    pub fn new(
        options: Vec<DropdownOption>,
        selected: impl Into<String>,
        on_change: impl Fn(String) -> MSG + 'static,
    ) -> Result<Self, DropdownError> {
        let selected = selected.into();
        if options.is_empty() {
            return Err(DropdownError::NoOptions);
        }
        if !options.iter().any(|option| option.value == selected) {
            return Err(DropdownError::UnknownSelection(selected));
        }
        Ok(Self {
            options,
            selected,
            expanded: false,
            on_change: Rc::new(on_change),
        })
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn selected_label(&self) -> &str {
        self.options
            .iter()
            .find(|option| option.value == self.selected)
            .map(|option| option.label.as_str())
            .unwrap_or_default()
    }

    /// Applies a click and returns the parent's on-change message when a
    /// selection was made. Re-selecting the current value still reports it.
    pub fn update(&mut self, msg: DropdownMsg) -> Option<MSG> {
        match msg {
            DropdownMsg::Select(value) => {
                if !self.options.iter().any(|option| option.value == value) {
                    tracing::warn!(%value, "ignoring selection of unknown option");
                    return None;
                }
                self.selected = value.clone();
                self.expanded = false;
                Some((self.on_change)(value))
            }
            DropdownMsg::Open => {
                self.expanded = true;
                None
            }
            DropdownMsg::Dismiss => {
                self.expanded = false;
                None
            }
        }
    }

    pub fn view(&self, lift: fn(DropdownMsg) -> MSG) -> Node<MSG> {
        div(
            [class("Dropdown relative inline-block text-left")],
            [
                button(
                    [
                        r#type("button"),
                        class("Dropdown__selected inline-flex items-center gap-2 px-3 py-2 rounded-md bg-ctp-surface1 border border-ctp-surface2 text-ctp-text"),
                        on_click(move |event| {
                            event.stop_propagation();
                            lift(DropdownMsg::Open)
                        }),
                    ],
                    [
                        span([class("Dropdown__label")], [text(self.selected_label())]),
                        span([class("Dropdown__icon text-ctp-subtext0")], [text("▾")]),
                    ],
                ),
                ul(
                    [class(&format!(
                        "Dropdown__list absolute right-0 mt-1 w-40 rounded-md bg-ctp-surface0 border border-ctp-surface2 shadow-lg z-10 {}",
                        if self.is_expanded() { "" } else { "hide hidden" }
                    ))],
                    self.options
                        .iter()
                        .map(|option| self.view_option(option, lift))
                        .collect::<Vec<_>>(),
                ),
            ],
        )
    }

    fn view_option(&self, option: &DropdownOption, lift: fn(DropdownMsg) -> MSG) -> Node<MSG> {
        let is_selected = option.value == self.selected();
        let option_value = option.value.clone();
        li(
            [
                key(option.value.clone()),
                class(&format!(
                    "Dropdown__item px-3 py-2 cursor-pointer hover:bg-ctp-surface1 {}",
                    if is_selected {
                        "Dropdown__item--selected text-ctp-blue font-medium"
                    } else {
                        "text-ctp-text"
                    }
                )),
                on_click(move |event| {
                    event.stop_propagation();
                    lift(DropdownMsg::Select(option_value.clone()))
                }),
            ],
            [text(&option.label)],
        )
    }
}
