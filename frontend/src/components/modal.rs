use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    pub children: Html,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let on_close = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50">
            <div class="bg-gray-800 border border-gray-700 text-white rounded-lg p-6 w-full max-w-lg max-h-screen overflow-y-auto">
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-xl font-bold">{props.title.clone()}</h2>
                    <button onclick={on_close} class="text-gray-400 hover:text-white">{"✕"}</button>
                </div>
                {props.children.clone()}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FormActionsProps {
    pub saving: bool,
    pub editing: bool,
    pub on_cancel: Callback<()>,
}

/// Cancel and submit buttons at the foot of an edit form.
#[function_component(FormActions)]
pub fn form_actions(props: &FormActionsProps) -> Html {
    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());
    let label = match (props.saving, props.editing) {
        (true, _) => "Saving...",
        (false, true) => "Update",
        (false, false) => "Create",
    };

    html! {
        <div class="flex justify-end space-x-2 mt-6">
            <button
                type="button"
                onclick={on_cancel}
                class="px-4 py-2 border border-gray-600 text-gray-300 rounded-md hover:bg-gray-700"
            >
                {"Cancel"}
            </button>
            <button
                type="submit"
                disabled={props.saving}
                class="px-4 py-2 bg-blue-600 text-white rounded-md hover:bg-blue-700 disabled:opacity-50"
            >
                {label}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FieldErrorsProps {
    pub fields: Vec<String>,
}

/// Lists the fields that failed validation.
#[function_component(FieldErrors)]
pub fn field_errors(props: &FieldErrorsProps) -> Html {
    if props.fields.is_empty() {
        return html! {};
    }
    html! {
        <div class="bg-red-900/40 border border-red-700 text-red-200 px-4 py-3 rounded mb-4 text-sm">
            {"Please check: "}{props.fields.join(", ")}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<Event>,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub multiline: bool,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let classes = "w-full px-3 py-2 bg-gray-700 border border-gray-600 rounded-md text-white focus:outline-none focus:ring-2 focus:ring-blue-500";
    html! {
        <div class="mb-4">
            <label class="block text-sm font-medium text-gray-300 mb-1">
                {props.label.clone()}
                if props.required {
                    <span class="text-red-400">{" *"}</span>
                }
            </label>
            if props.multiline {
                <textarea
                    rows="3"
                    class={classes}
                    value={props.value.clone()}
                    onchange={props.on_change.clone()}
                />
            } else {
                <input
                    type={props.input_type.clone()}
                    class={classes}
                    value={props.value.clone()}
                    onchange={props.on_change.clone()}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CheckboxFieldProps {
    pub label: AttrValue,
    pub checked: bool,
    pub on_change: Callback<Event>,
}

#[function_component(CheckboxField)]
pub fn checkbox_field(props: &CheckboxFieldProps) -> Html {
    html! {
        <label class="flex items-center space-x-2 mb-4 text-sm text-gray-300">
            <input type="checkbox" checked={props.checked} onchange={props.on_change.clone()} />
            <span>{props.label.clone()}</span>
        </label>
    }
}
