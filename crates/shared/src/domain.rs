use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(MessageId);
id_newtype!(ChatId);

/// Who authored a message: the local user ("sent") or the simulated counterpart ("received").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Local,
    Remote,
}

impl Origin {
    pub fn is_local(self) -> bool {
        self == Origin::Local
    }

    pub fn style_class(self) -> &'static str {
        match self {
            Origin::Local => "message-sent",
            Origin::Remote => "message-received",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Login,
    Register,
    ChatList,
    Chat,
}

impl Screen {
    pub fn name(self) -> &'static str {
        match self {
            Screen::Login => "Login",
            Screen::Register => "Register",
            Screen::ChatList => "ChatList",
            Screen::Chat => "Chat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    Chat,
    Login,
    Register,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Chat => "/chat",
            Route::Login => "/auth/login",
            Route::Register => "/auth/register",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        match path {
            "/" | "" => Some(Route::Home),
            "/chat" => Some(Route::Chat),
            "/auth/login" => Some(Route::Login),
            "/auth/register" => Some(Route::Register),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    Login,
    Register,
}
