use shared::epoch::RequestEpoch;
use shared::session::SessionCommand;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::api::auth_api;
use crate::components::composite::account_summary::{AccountSummary, ACCOUNTS};
use crate::components::composite::profile_form::ProfileForm;
use crate::user_session::use_session;

#[function_component(Profile)]
pub fn profile() -> Html {
    let session = use_session();
    let epoch = use_memo((), |_| RequestEpoch::default());

    {
        let session = session.clone();
        let epoch = epoch.clone();
        use_mount(move || {
            let ticket = epoch.begin();
            let token = session.token();
            spawn_local(async move {
                let result = match auth_api::auth_client() {
                    Ok(client) => client.fetch_profile(&token).await,
                    Err(error) => Err(error),
                };
                if !ticket.is_current() {
                    log::debug!("Dropping superseded profile response, generation={}", ticket.generation());
                    return;
                }
                match result {
                    Ok(profile) => session.dispatch(SessionCommand::SetUserName(profile.user_name())),
                    Err(error) => log::warn!("Fail to fetch user profile, error={error}"),
                }
            });
        });
    }

    {
        let epoch = epoch.clone();
        use_unmount(move || epoch.invalidate());
    }

    let user = session.memoized_user();

    html! {
        <main class="main bg-dark">
            <div class="header">
                <h1>
                    { "Welcome back" }
                    <br />
                    { format!("{} {}!", user.first_name, user.last_name) }
                </h1>
                <ProfileForm />
            </div>
            <h2 class="sr-only">{ "Accounts" }</h2>
            { for ACCOUNTS.iter().map(|account| html! { <AccountSummary account={account.clone()} /> }) }
        </main>
    }
}
