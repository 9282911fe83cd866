use shared::epoch::RequestEpoch;
use shared::session::SessionCommand;
use shared::validators::valid_name;
use shared::UserName;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::api::auth_api;
use crate::components::atoms::field_error::FieldError;
use crate::components::atoms::input_text::{InputText, InputType};
use crate::user_session::use_session;

#[function_component(ProfileForm)]
pub fn profile_form() -> Html {
    let session = use_session();
    let user = session.memoized_user();
    let editing = use_state(|| false);
    let draft = use_state(|| (*user).clone());
    let epoch = use_memo((), |_| RequestEpoch::default());

    {
        let epoch = epoch.clone();
        use_unmount(move || epoch.invalidate());
    }

    let on_edit = {
        let editing = editing.clone();
        let draft = draft.clone();
        let user = user.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set((*user).clone());
            editing.set(true);
        })
    };

    let on_cancel = {
        let editing = editing.clone();
        let draft = draft.clone();
        let user = user.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            draft.set((*user).clone());
            editing.set(false);
        })
    };

    let on_change_first_name = {
        let draft = draft.clone();
        Callback::from(move |first_name: String| {
            draft.set(UserName {
                first_name,
                ..(*draft).clone()
            });
        })
    };

    let on_change_last_name = {
        let draft = draft.clone();
        Callback::from(move |last_name: String| {
            draft.set(UserName {
                last_name,
                ..(*draft).clone()
            });
        })
    };

    let first_name_error = valid_name(&draft.first_name);
    let last_name_error = valid_name(&draft.last_name);
    let pristine = *draft == *user;

    let on_submit = {
        let session = session.clone();
        let editing = editing.clone();
        let draft = draft.clone();
        let epoch = epoch.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let edited = (*draft).clone();
            if !valid_name(&edited.first_name).is_empty() || !valid_name(&edited.last_name).is_empty() {
                return;
            }
            let session = session.clone();
            let editing = editing.clone();
            let ticket = epoch.begin();
            spawn_local(async move {
                let result = match auth_api::auth_client() {
                    Ok(client) => client.update_profile(&session.token(), &edited).await,
                    Err(error) => Err(error),
                };
                if !ticket.is_current() {
                    log::debug!("Dropping superseded profile update, generation={}", ticket.generation());
                    return;
                }
                // A rejected update leaves the stored name untouched
                match result {
                    Ok(updated) => {
                        session.dispatch(SessionCommand::EditUserName(updated));
                        editing.set(false);
                    }
                    Err(error) => log::warn!("Fail to update user profile, error={error}"),
                }
            });
        })
    };

    if !*editing {
        return html! {
            <button class="edit-button" onclick={on_edit}>{ "Edit Name" }</button>
        };
    }

    html! {
        <form onsubmit={on_submit}>
            <div class="input-wrapper">
                <div class="input-wrapper">
                    <InputText
                        id="first-name"
                        name="firstName"
                        value={Some(draft.first_name.clone())}
                        input_type={InputType::Text}
                        autofocus={true}
                        on_change={on_change_first_name} />
                    <FieldError message={first_name_error} />
                </div>
                <div class="input-wrapper">
                    <InputText
                        id="last-name"
                        name="lastName"
                        value={Some(draft.last_name.clone())}
                        input_type={InputType::Text}
                        on_change={on_change_last_name} />
                    <FieldError message={last_name_error} />
                </div>
            </div>
            <div class="input-wrapper">
                <button class="edit-button" type="submit" disabled={pristine}>{ "Save" }</button>
                <button class="edit-button" type="button" onclick={on_cancel}>{ "Cancel" }</button>
            </div>
        </form>
    }
}
