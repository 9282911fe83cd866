use std::cell::RefCell;
use std::rc::Rc;

use crate::UserName;

/// Authentication state of the running client. An empty token means signed out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub token: String,
    pub user_name: Rc<UserName>,
    pub persist_is_checked: bool,
}

impl Session {
    pub fn logged(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn is_initial(&self) -> bool {
        *self == Session::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    SetToken(String),
    /// Names fetched from the profile endpoint.
    SetUserName(UserName),
    /// Names edited by the user.
    EditUserName(UserName),
    ToggleCheck,
    /// Replaces the state with a snapshot loaded at startup.
    Rehydrate(Session),
    Reset,
}

impl SessionCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetToken(_) => "set_token",
            Self::SetUserName(_) => "set_user_name",
            Self::EditUserName(_) => "edit_user_name",
            Self::ToggleCheck => "toggle_check",
            Self::Rehydrate(_) => "rehydrate",
            Self::Reset => "reset",
        }
    }
}

pub fn transition(state: &Session, command: SessionCommand) -> Session {
    match command {
        SessionCommand::SetToken(token) => Session {
            token,
            ..state.clone()
        },
        SessionCommand::SetUserName(user_name) | SessionCommand::EditUserName(user_name) => {
            Session {
                user_name: Rc::new(user_name),
                ..state.clone()
            }
        }
        SessionCommand::ToggleCheck => Session {
            persist_is_checked: !state.persist_is_checked,
            ..state.clone()
        },
        SessionCommand::Rehydrate(session) => session,
        SessionCommand::Reset => Session::default(),
    }
}

/// Caches the `{first_name, last_name}` projection of the session, keyed by the
/// identity of the `user_name` it was computed from.
#[derive(Debug, Default)]
pub struct UserSelector {
    cached: RefCell<Option<(Rc<UserName>, Rc<UserName>)>>,
}

impl UserSelector {
    pub fn select(&self, session: &Session) -> Rc<UserName> {
        let mut cached = self.cached.borrow_mut();
        if let Some((input, output)) = cached.as_ref() {
            if Rc::ptr_eq(input, &session.user_name) {
                return output.clone();
            }
        }
        let output = Rc::new(UserName::new(
            session.user_name.first_name.clone(),
            session.user_name.last_name.clone(),
        ));
        *cached = Some((session.user_name.clone(), output.clone()));
        output
    }
}

/// Immutable store value. Reducing a command yields a new store and leaves the
/// previous one untouched; the user selector is shared between generations.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    session: Rc<Session>,
    user_selector: Rc<UserSelector>,
}

impl SessionStore {
    pub fn new(session: Session) -> Self {
        Self {
            session: Rc::new(session),
            user_selector: Rc::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.logged()
    }

    pub fn reduce(&self, command: SessionCommand) -> Self {
        log::debug!("Session command, command={}", command.name());
        Self {
            session: Rc::new(transition(&self.session, command)),
            user_selector: self.user_selector.clone(),
        }
    }

    pub fn memoized_user(&self) -> Rc<UserName> {
        self.user_selector.select(&self.session)
    }
}

impl PartialEq for SessionStore {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session
    }
}
