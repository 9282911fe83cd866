use shared::{LoginFieldErrors, UserCredentials};
use yew::prelude::*;

use crate::components::atoms::field_error::FieldError;
use crate::components::atoms::input_checkbox::InputCheckbox;
use crate::components::atoms::input_text::{InputText, InputType};

#[derive(Debug, PartialEq, Default, Clone)]
pub struct LoginFormData {
    pub email: String,
    pub password: String,
}

#[derive(PartialEq, Properties)]
pub struct Props {
    pub on_login: Callback<UserCredentials>,
    /// Messages coming from the server, shown under the matching field.
    pub server_errors: LoginFieldErrors,
    pub remember: bool,
    pub on_toggle_remember: Callback<bool>,
}

#[function_component(LoginForm)]
pub fn login_form(props: &Props) -> Html {
    let state = use_state(LoginFormData::default);
    let submitted = use_state(|| false);

    let on_change_email = {
        let state = state.clone();
        Callback::from(move |input_text: String| {
            let mut data: LoginFormData = (*state).clone();
            data.email = input_text;
            state.set(data);
        })
    };

    let on_change_password = {
        let state = state.clone();
        Callback::from(move |input_text: String| {
            let mut data = (*state).clone();
            data.password = input_text;
            state.set(data);
        })
    };

    let on_submit = {
        let state = state.clone();
        let submitted = submitted.clone();
        let on_login = props.on_login.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            submitted.set(true);
            let credentials = UserCredentials::new(&state.email, &state.password);
            if credentials.validate().is_empty() {
                on_login.emit(credentials);
            } else {
                log::info!("Login form rejected, please fill all inputs");
            }
        })
    };

    // Client-side messages only appear once the user tried to submit.
    let client_errors = if *submitted {
        UserCredentials::new(&state.email, &state.password).validate()
    } else {
        LoginFieldErrors::default()
    };

    html! {
        <form onsubmit={on_submit}>
            <div class="input-wrapper">
                <label for="email">{ "Username" }<span class="required-mark">{ "*" }</span></label>
                <InputText
                    id="email"
                    name="email"
                    value={Some(state.email.clone())}
                    input_type={InputType::Text}
                    autofocus={true}
                    on_change={on_change_email} />
                <FieldError message={client_errors.email.clone()} />
                <FieldError message={props.server_errors.email.clone()} />
            </div>
            <div class="input-wrapper">
                <label for="password">{ "Password" }<span class="required-mark">{ "*" }</span></label>
                <InputText
                    id="password"
                    name="password"
                    value={Some(state.password.clone())}
                    input_type={InputType::Password}
                    on_change={on_change_password} />
                <FieldError message={client_errors.password.clone()} />
                <FieldError message={props.server_errors.password.clone()} />
            </div>
            <div class="input-remember">
                <InputCheckbox
                    id="remember-me"
                    name="remember-me"
                    checked={props.remember}
                    on_change={props.on_toggle_remember.clone()} />
                <label for="remember-me">{ "Remember me" }</label>
            </div>
            <button class="sign-in-button" type="submit">{ "Sign In" }</button>
        </form>
    }
}
