use std::cell::RefCell;
use std::rc::Rc;

use callwatch_shared::api::AuthApi;
use callwatch_shared::session::{AuthError, Session};
use callwatch_shared::{ApiError, ApiResult, AuthToken, LoginCredentials};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::{ApiClient, auth::AuthService};
use crate::storage::BrowserTokenStore;

pub type AppSession = Session<BrowserTokenStore>;

// Auth context for sharing the session across the app
#[derive(Clone)]
pub struct AuthContext {
    session: Rc<RefCell<AppSession>>,
    pub authenticated: bool,
    changed: Callback<()>,
}

impl PartialEq for AuthContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session) && self.authenticated == other.authenticated
    }
}

impl AuthContext {
    pub fn complete_login(&self, result: ApiResult<AuthToken>) -> Result<(), AuthError> {
        let outcome = self.session.borrow_mut().complete_login(result);
        self.changed.emit(());
        outcome
    }

    pub fn logout(&self) {
        self.session.borrow_mut().logout();
        self.changed.emit(());
    }

    /// Signs out when `error` is a rejected token; the router then sends the
    /// operator to the login view.
    pub fn expire_on(&self, error: &ApiError) -> bool {
        let expired = self.session.borrow_mut().expire_on(error);
        if expired {
            self.changed.emit(());
        }
        expired
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub token_key: AttrValue,
    pub children: Children,
}

#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let session = use_memo(props.token_key.clone(), |key| {
        RefCell::new(Session::restore(BrowserTokenStore::new(key.to_string())))
    });
    let authenticated = use_state(|| session.borrow().is_authenticated());

    let changed = {
        let session = session.clone();
        let authenticated = authenticated.clone();
        Callback::from(move |_| authenticated.set(session.borrow().is_authenticated()))
    };

    let context = AuthContext {
        session,
        authenticated: *authenticated,
        changed,
    };

    html! {
        <ContextProvider<AuthContext> {context}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

#[hook]
pub fn use_auth() -> Option<AuthContext> {
    use_context::<AuthContext>()
}

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub on_login: Callback<()>,
}

#[function_component(LoginForm)]
pub fn login_form(props: &LoginFormProps) -> Html {
    let auth = use_auth();
    let client = use_context::<ApiClient>();
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error_message = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let onsubmit = {
        let username = username.clone();
        let password = password.clone();
        let error_message = error_message.clone();
        let loading = loading.clone();
        let on_login = props.on_login.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let (Some(auth), Some(client)) = (auth.clone(), client.clone()) else {
                tracing::error!("login form rendered outside its providers");
                return;
            };

            let credentials = LoginCredentials::new((*username).clone(), (*password).clone());
            if let Err(error) = AppSession::check_credentials(&credentials) {
                error_message.set(Some(error.to_string()));
                return;
            }

            loading.set(true);
            error_message.set(None);

            let error_message = error_message.clone();
            let loading = loading.clone();
            let on_login = on_login.clone();
            spawn_local(async move {
                let result = AuthService::new(client).request_token(&credentials).await;
                loading.set(false);
                match auth.complete_login(result) {
                    Ok(()) => on_login.emit(()),
                    Err(error) => error_message.set(Some(error.to_string())),
                }
            });
        })
    };

    let username_oninput = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let password_oninput = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-gray-900">
                        {"Sign in to CallWatch"}
                    </h2>
                    <p class="mt-2 text-center text-sm text-gray-600">
                        {"Email-triggered call notifications"}
                    </p>
                </div>

                <form class="mt-8 space-y-6" {onsubmit}>
                    <div class="rounded-md shadow-sm -space-y-px">
                        <div>
                            <label for="username" class="sr-only">{"Username"}</label>
                            <input
                                id="username"
                                name="username"
                                type="text"
                                autocomplete="username"
                                class="appearance-none rounded-none relative block w-full px-3 py-2 border border-gray-300 placeholder-gray-500 text-gray-900 rounded-t-md focus:outline-none focus:ring-blue-500 focus:border-blue-500 focus:z-10 sm:text-sm"
                                placeholder="Username"
                                value={(*username).clone()}
                                oninput={username_oninput}
                            />
                        </div>
                        <div>
                            <label for="password" class="sr-only">{"Password"}</label>
                            <input
                                id="password"
                                name="password"
                                type="password"
                                autocomplete="current-password"
                                class="appearance-none rounded-none relative block w-full px-3 py-2 border border-gray-300 placeholder-gray-500 text-gray-900 rounded-b-md focus:outline-none focus:ring-blue-500 focus:border-blue-500 focus:z-10 sm:text-sm"
                                placeholder="Password"
                                value={(*password).clone()}
                                oninput={password_oninput}
                            />
                        </div>
                    </div>

                    if let Some(error) = (*error_message).clone() {
                        <div class="bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded relative">
                            {error}
                        </div>
                    }

                    <div>
                        <button
                            type="submit"
                            disabled={*loading}
                            class="group relative w-full flex justify-center py-2 px-4 border border-transparent text-sm font-medium rounded-md text-white bg-blue-600 hover:bg-blue-700 focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-blue-500 disabled:opacity-50 disabled:cursor-not-allowed"
                        >
                            if *loading {
                                {"Signing in..."}
                            } else {
                                {"Sign in"}
                            }
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
