use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rum::constants::LOG_TARGET;

/// A closed native enumeration that can be resolved from a loose string token.
///
/// Tokens are matched case-insensitively. Anything outside the table resolves to
/// [`NativeEnum::DEFAULT`] instead of failing, so a malformed categorical field never
/// drops an otherwise valid event.
pub trait NativeEnum: Copy + Sized + 'static {
    /// Category label used in diagnostics.
    const CATEGORY: &'static str;
    const DEFAULT: Self;
    /// Token table, in lower case.
    const TOKENS: &'static [(&'static str, Self)];

    fn as_str(&self) -> &'static str;

    fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::TOKENS
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(token))
            .map(|(_, value)| *value)
    }
}

/// Resolves `token` against the table of `T`, falling back to `T::DEFAULT`.
pub fn resolve<T: NativeEnum>(token: &str) -> T {
    match T::from_token(token) {
        Some(value) => value,
        None => {
            log::debug!(
                target: LOG_TARGET,
                "unknown {} `{token}`, using `{}`",
                T::CATEGORY,
                T::DEFAULT.as_str()
            );
            T::DEFAULT
        }
    }
}

macro_rules! native_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $category:literal, default = $default:ident {
            $($variant:ident => $token:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),*
        }

        impl NativeEnum for $name {
            const CATEGORY: &'static str = $category;
            const DEFAULT: Self = $name::$default;
            const TOKENS: &'static [(&'static str, Self)] = &[$(($token, $name::$variant)),*];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token),*
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                <$name as NativeEnum>::DEFAULT
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(token: &str) -> Self {
                resolve(token)
            }
        }
    };
}

native_enum! {
    /// HTTP method of a tracked resource.
    HttpMethod, "http method", default = Get {
        Get => "get",
        Post => "post",
        Put => "put",
        Delete => "delete",
        Head => "head",
        Patch => "patch",
    }
}

native_enum! {
    /// Kind of a tracked resource.
    ResourceKind, "resource kind", default = Other {
        Image => "image",
        Xhr => "xhr",
        Beacon => "beacon",
        Css => "css",
        Document => "document",
        Fetch => "fetch",
        Font => "font",
        Js => "js",
        Media => "media",
        Native => "native",
        Other => "other",
    }
}

native_enum! {
    /// Origin of a reported error.
    ErrorSource, "error source", default = Source {
        Source => "source",
        Network => "network",
        Webview => "webview",
        Console => "console",
        Custom => "custom",
    }
}

native_enum! {
    UserActionType, "action type", default = Custom {
        Tap => "tap",
        Scroll => "scroll",
        Swipe => "swipe",
        Custom => "custom",
    }
}
