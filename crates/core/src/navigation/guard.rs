use uuid::Uuid;

use crate::models::account::Role;

/// Authentication side of the navigation state.
///
/// `Authenticating` is the session-bootstrap window: an auth check is in
/// flight and the guard holds off all redirects until it resolves, so the
/// user never sees a flicker through the wrong page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticating,
    Authenticated(Role),
}

/// Every page the app can show. `Profile` carries the viewed user's id as
/// its sub-resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Landing,
    Login,
    Signup,
    Simulation,
    Analysis,
    Strategy,
    Education,
    Tenders,
    Leaderboard,
    Admin,
    Profile(Uuid),
}

impl Page {
    /// Pages reserved for logged-out visitors. A logged-in user landing on
    /// one of these is redirected to the default authenticated page.
    #[must_use]
    pub fn is_public_only(&self) -> bool {
        matches!(self, Page::Landing | Page::Login | Page::Signup)
    }

    /// Pages that additionally require the admin role. Unauthorized access
    /// renders access-denied instead of redirecting.
    #[must_use]
    pub fn is_admin_only(&self) -> bool {
        matches!(self, Page::Admin)
    }

    /// Where a logged-in user goes by default.
    #[must_use]
    pub fn default_authenticated() -> Self {
        Page::Simulation
    }
}

/// The full navigation state: auth × current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    pub auth: AuthState,
    pub page: Page,
}

impl NavState {
    /// Initial state: session check pending, landing page shown.
    #[must_use]
    pub fn new() -> Self {
        Self {
            auth: AuthState::Authenticating,
            page: Page::Landing,
        }
    }
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything that can move the navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// An auth-session check started (e.g. app boot).
    SessionChecking,
    /// The auth-session check finished: a role when signed in, `None` when
    /// signed out.
    SessionResolved(Option<Role>),
    /// The UI requested a page change.
    Navigate(Page),
}

/// What the frontend should put on screen for a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Session check still in flight — show a loading placeholder.
    Loading,
    /// Render this page.
    Render(Page),
    /// The page exists but this user may not see it (admin pages for
    /// non-admins). Rendered in place, not redirected.
    AccessDenied,
}

/// Advance the navigation state by one event, then enforce the access
/// guard. Pure: same inputs, same output, no side effects.
#[must_use]
pub fn reduce(state: NavState, event: NavEvent) -> NavState {
    let next = match event {
        NavEvent::SessionChecking => NavState {
            auth: AuthState::Authenticating,
            page: state.page,
        },
        NavEvent::SessionResolved(Some(role)) => NavState {
            auth: AuthState::Authenticated(role),
            page: state.page,
        },
        NavEvent::SessionResolved(None) => NavState {
            auth: AuthState::Unauthenticated,
            page: state.page,
        },
        NavEvent::Navigate(page) => NavState {
            auth: state.auth,
            page,
        },
    };
    enforce(next)
}

/// Apply the guard invariant to a state.
///
/// - authenticated on a public-only page → default authenticated page
/// - unauthenticated on a protected page → landing
/// - authenticating → untouched (no redirects during session bootstrap)
///
/// Idempotent: enforcing an already-consistent state changes nothing.
#[must_use]
pub fn enforce(state: NavState) -> NavState {
    match state.auth {
        AuthState::Authenticating => state,
        AuthState::Authenticated(_) if state.page.is_public_only() => NavState {
            page: Page::default_authenticated(),
            ..state
        },
        AuthState::Unauthenticated if !state.page.is_public_only() => NavState {
            page: Page::Landing,
            ..state
        },
        _ => state,
    }
}

/// Decide what a guarded state displays. Role checks happen here: the
/// guard redirects on authentication, but authorization failures render
/// in place.
#[must_use]
pub fn resolve(state: &NavState) -> Resolution {
    match state.auth {
        AuthState::Authenticating => Resolution::Loading,
        AuthState::Unauthenticated => Resolution::Render(state.page.clone()),
        AuthState::Authenticated(role) => {
            if state.page.is_admin_only() && role != Role::Admin {
                Resolution::AccessDenied
            } else {
                Resolution::Render(state.page.clone())
            }
        }
    }
}
