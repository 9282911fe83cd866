use std::rc::Rc;

use shared::persist::{
    MemoryStorage, PersistConfig, PersistError, PersistGate, Persistor, SessionStorage,
};
use shared::session::{Session, SessionCommand, SessionStore};
use shared::UserName;
use yew::prelude::*;
use yew_hooks::prelude::*;

/// `window.localStorage` backend. Falls back to an in-memory map when the
/// browser denies access, so the session still lives for the page lifetime.
#[derive(Default)]
pub struct LocalStorage {
    fallback: MemoryStorage,
}

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .ok_or_else(|| PersistError::Storage("no window".to_owned()))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| PersistError::Storage("local storage unavailable".to_owned()))
    }

    fn backend(&self) -> Option<web_sys::Storage> {
        match Self::storage() {
            Ok(storage) => Some(storage),
            Err(error) => {
                log::debug!("Using in-memory session storage, error={error}");
                None
            }
        }
    }
}

fn js_error(error: wasm_bindgen::JsValue) -> PersistError {
    PersistError::Storage(format!("{error:?}"))
}

impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        match self.backend() {
            Some(storage) => storage.get_item(key).map_err(js_error),
            None => self.fallback.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        match self.backend() {
            Some(storage) => storage.set_item(key, value).map_err(js_error),
            None => self.fallback.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        match self.backend() {
            Some(storage) => storage.remove_item(key).map_err(js_error),
            None => self.fallback.remove(key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState(SessionStore);

impl Reducible for SessionState {
    type Action = SessionCommand;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(SessionState(self.0.reduce(action)))
    }
}

/// Handle given to every component through context.
#[derive(Clone)]
pub struct SessionHandle {
    state: UseReducerHandle<SessionState>,
    gate: Rc<PersistGate<LocalStorage>>,
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && Rc::ptr_eq(&self.gate, &other.gate)
    }
}

impl SessionHandle {
    pub fn session(&self) -> &Session {
        self.state.0.session()
    }

    pub fn token(&self) -> String {
        self.session().token.clone()
    }

    pub fn logged(&self) -> bool {
        self.state.0.is_authenticated()
    }

    pub fn memoized_user(&self) -> Rc<UserName> {
        self.state.0.memoized_user()
    }

    pub fn dispatch(&self, command: SessionCommand) {
        self.state.dispatch(command);
    }

    /// Sign out: drops the stored snapshot and resets the session.
    pub fn purge(&self) {
        if let Err(error) = self.gate.purge() {
            log::warn!("Fail to purge stored session, error={error}");
        }
        self.state.dispatch(SessionCommand::Reset);
    }
}

#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>().expect("SessionProvider must wrap the application")
}

#[derive(PartialEq, Properties)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
}

/// Owns the session. Children render only once the stored snapshot has been
/// loaded. State changes are written back through the persist gate, which
/// ignores them until the rehydrated session is in the store.
#[function_component(SessionProvider)]
pub fn session_provider(props: &Props) -> Html {
    let gate = use_memo((), |_| {
        PersistGate::new(Persistor::new(LocalStorage::default(), PersistConfig::default()))
    });
    let state = use_reducer(SessionState::default);
    let rehydrated = use_state(|| false);

    {
        let gate = gate.clone();
        let state = state.clone();
        let rehydrated = rehydrated.clone();
        use_mount(move || {
            match gate.rehydrate() {
                Ok(session) => state.dispatch(SessionCommand::Rehydrate(session)),
                Err(error) => {
                    log::warn!("Fail to rehydrate session, starting signed out. Error={error}")
                }
            }
            rehydrated.set(true);
        });
    }

    {
        let gate = gate.clone();
        use_effect_with((*state).clone(), move |state| {
            if let Err(error) = gate.persist(state.0.session()) {
                log::warn!("Fail to persist session, error={error}");
            }
            || ()
        });
    }

    if !*rehydrated {
        return html! {};
    }

    let handle = SessionHandle { state, gate };
    html! {
        <ContextProvider<SessionHandle> context={handle}>
            { props.children.clone() }
        </ContextProvider<SessionHandle>>
    }
}
