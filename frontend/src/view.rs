use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use shared::{Filter, KeyValueStore, Task};

use crate::dropdown::DropdownMsg;
use crate::{Model, Msg};

impl<S: KeyValueStore> Model<S> {
    /// Root of the page. Its click handler closes the filter selector; the
    /// selector stops propagation for clicks it handles itself.
    pub(crate) fn view_app(&self) -> Node<Msg> {
        div(
            [
                class("min-h-screen bg-ctp-base text-ctp-text"),
                on_click(|_| Msg::FilterSelector(DropdownMsg::Dismiss)),
            ],
            [
                self.view_header(),
                div(
                    [class("max-w-2xl mx-auto px-6 py-8")],
                    [div(
                        [class("bg-ctp-surface0 rounded-lg shadow-lg p-6 border border-ctp-surface1")],
                        [
                            self.view_create_form(),
                            self.view_toolbar(),
                            self.view_task_list(),
                            self.view_footer(),
                        ],
                    )],
                ),
            ],
        )
    }

    fn view_header(&self) -> Node<Msg> {
        header([class("bg-ctp-mantle shadow-lg border-b border-ctp-surface0")], [
            div([class("max-w-2xl mx-auto px-6 py-4")], [
                h1([class("text-2xl font-bold text-ctp-text")], [text("Tasks")]),
            ]),
        ])
    }

    fn view_create_form(&self) -> Node<Msg> {
        div([class("flex gap-2 mb-6")], [
            input([
                r#type("text"),
                id("taskBox"),
                placeholder("What needs doing?"),
                value(&self.new_task_text),
                on_input(|event| Msg::SetNewTaskText(event.value())),
                on_keydown(|event| Msg::TaskBoxKey(event.key())),
                class("flex-1 px-3 py-2 bg-ctp-surface1 border border-ctp-surface2 rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-blue focus:border-transparent"),
            ], []),
            button([
                id("addTask"),
                r#type("button"),
                on_click(|_| Msg::AddTask),
                class("bg-ctp-blue hover:bg-ctp-sapphire text-ctp-base font-medium px-6 py-2 rounded-md transition-colors duration-200"),
            ], [text("Add")]),
        ])
    }

    fn view_toolbar(&self) -> Node<Msg> {
        div([class("flex items-center justify-between mb-4")], [
            h2([class("text-lg font-semibold text-ctp-text")], [text(self.list_heading())]),
            self.filter_selector.view(Msg::FilterSelector),
        ])
    }

    fn list_heading(&self) -> &'static str {
        match self.filter {
            Filter::All => "All tasks",
            Filter::Pending => "Pending tasks",
            Filter::Completed => "Completed tasks",
        }
    }

    fn view_task_list(&self) -> Node<Msg> {
        if self.tasks.is_empty() {
            return div([class("text-center py-10 text-ctp-subtext0 italic")], [text("Nothing here.")]);
        }
        ul(
            [class("TaskList space-y-3")],
            self.tasks.iter().map(|task| self.view_task(task)).collect::<Vec<_>>(),
        )
    }

    fn view_task(&self, task: &Task) -> Node<Msg> {
        let is_editing = self.editing_task.as_ref() == Some(&task.id);

        li(
            [
                key(task.id.as_str().to_string()),
                class(&format!(
                    "Task group border rounded-xl p-4 bg-ctp-surface0 transition-all duration-300 {}",
                    if task.done {
                        "Task--finished border-ctp-green bg-ctp-green/10"
                    } else {
                        "border-ctp-surface1 hover:border-ctp-blue"
                    }
                )),
            ],
            [if is_editing {
                self.view_task_editor(task)
            } else {
                self.view_task_display(task)
            }],
        )
    }

    fn view_task_display(&self, task: &Task) -> Node<Msg> {
        let done_id = task.id.clone();
        let edit_id = task.id.clone();
        let delete_id = task.id.clone();

        div([class("Task__display flex items-center gap-4")], [
            span([class(&format!(
                "Task__name flex-1 min-w-0 break-words {}",
                if task.done { "line-through text-ctp-overlay1" } else { "text-ctp-text" }
            ))], [text(&task.text)]),
            div([class("Task__controls flex gap-2 flex-shrink-0")], [
                button([
                    r#type("button"),
                    class("Task__Icon Task__Icon--done inline-flex items-center justify-center w-8 h-8 rounded-lg bg-ctp-green/20 text-ctp-green hover:bg-ctp-green/30"),
                    on_click(move |_| Msg::ToggleTask(done_id.clone())),
                ], [text(if task.done { "↺" } else { "✓" })]),
                button([
                    r#type("button"),
                    class("Task__Icon Task__Icon--edit inline-flex items-center justify-center w-8 h-8 rounded-lg bg-ctp-blue/20 text-ctp-blue hover:bg-ctp-blue/30"),
                    on_click(move |_| Msg::EditTask(edit_id.clone())),
                ], [text("✏️")]),
                button([
                    r#type("button"),
                    class("Task__Icon Task__Icon--delete inline-flex items-center justify-center w-8 h-8 rounded-lg bg-ctp-red/20 text-ctp-red hover:bg-ctp-red/30"),
                    on_click(move |_| Msg::DeleteTask(delete_id.clone())),
                ], [text("🗑️")]),
            ]),
        ])
    }

    fn view_task_editor(&self, task: &Task) -> Node<Msg> {
        let save_id = task.id.clone();

        div([class("Task__edit flex items-center gap-2")], [
            input([
                r#type("text"),
                id(&format!("{}_todo-edit-box", task.id)),
                value(&self.edit_text),
                on_input(|event| Msg::SetEditText(event.value())),
                class("flex-1 px-3 py-2 bg-ctp-surface1 border border-ctp-surface2 rounded-md text-ctp-text focus:outline-none focus:ring-2 focus:ring-ctp-blue focus:border-transparent"),
            ], []),
            button([
                r#type("button"),
                id(&format!("{}_todo-save-btn", task.id)),
                on_click(move |_| Msg::SaveEdit(save_id.clone())),
                class("bg-ctp-green hover:bg-ctp-teal text-ctp-base font-medium px-4 py-2 rounded-md transition-colors duration-200"),
            ], [text("Save")]),
            button([
                r#type("button"),
                on_click(|_| Msg::CancelEdit),
                class("bg-ctp-overlay0 hover:bg-ctp-overlay1 text-ctp-text font-medium px-4 py-2 rounded-md transition-colors duration-200"),
            ], [text("Cancel")]),
        ])
    }

    fn view_footer(&self) -> Node<Msg> {
        div([class("flex items-center justify-between mt-6 pt-4 border-t border-ctp-surface1 text-sm text-ctp-subtext0")], [
            span([], [text(&format!(
                "{} pending, {} completed",
                self.counts.pending, self.counts.completed
            ))]),
            if self.counts.completed > 0 {
                button([
                    r#type("button"),
                    on_click(|_| Msg::ClearCompleted),
                    class("bg-ctp-red/20 text-ctp-red hover:bg-ctp-red/30 px-3 py-1 rounded-full font-medium transition-colors duration-200"),
                ], [text("Clear completed")])
            } else {
                span([], [])
            },
        ])
    }
}
