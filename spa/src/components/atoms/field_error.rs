use yew::prelude::*;

#[derive(PartialEq, Properties)]
pub struct Props {
    pub message: AttrValue,
}

#[function_component(FieldError)]
pub fn field_error(props: &Props) -> Html {
    if props.message.is_empty() {
        return html! {};
    }
    html! {
        <span class="field-error">{ props.message.clone() }</span>
    }
}
