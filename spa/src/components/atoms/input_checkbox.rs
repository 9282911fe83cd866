use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlInputElement};
use yew::prelude::*;

#[derive(PartialEq, Properties, Default, Debug)]
pub struct Props {
    pub id: String,
    pub name: String,
    pub checked: bool,
    pub on_change: Callback<bool>,
}

#[function_component(InputCheckbox)]
pub fn input_checkbox(props: &Props) -> Html {
    let callback = props.on_change.clone();
    let on_change = {
        Callback::from(move |event: Event| {
            let target: EventTarget = event.target().expect("Fail to cast to EventTarget");
            let checked = target.unchecked_into::<HtmlInputElement>().checked();
            callback.emit(checked);
        })
    };
    html! {
        <input
            id={props.id.clone()}
            name={props.name.clone()}
            type="checkbox"
            checked={props.checked}
            onchange={on_change} />
    }
}
