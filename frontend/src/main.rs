use callwatch_shared::guard::{self, GuardDecision, RouteAccess};
use callwatch_shared::Config;
use wasm_bindgen::JsValue;
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod logging;
mod pages;
mod services;
mod storage;

use components::{auth::{AuthProvider, LoginForm, use_auth}, layout::Layout};
use pages::{
    call_logs::CallLogsPage,
    contact_groups::ContactGroupsPage,
    contacts::ContactsPage,
    email_events::EmailEventsPage,
    home::HomePage,
    triggers::TriggersPage,
};
use services::ApiClient;

const TAILWIND_CSS: &str = "https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css";

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/contacts")]
    Contacts,
    #[at("/contact-groups")]
    ContactGroups,
    #[at("/triggers")]
    Triggers,
    #[at("/call-logs")]
    CallLogs,
    #[at("/email-events")]
    EmailEvents,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub fn access(&self) -> RouteAccess {
        match self {
            Route::Login => RouteAccess::GuestOnly,
            Route::NotFound => RouteAccess::Public,
            _ => RouteAccess::Protected,
        }
    }
}

fn switch(route: Route) -> Html {
    html! { <GuardedRoute {route} /> }
}

#[derive(Properties, PartialEq)]
struct GuardedRouteProps {
    route: Route,
}

#[function_component(GuardedRoute)]
fn guarded_route(props: &GuardedRouteProps) -> Html {
    let authenticated = use_auth().map(|auth| auth.authenticated).unwrap_or(false);

    match guard::decide(props.route.access(), authenticated) {
        GuardDecision::RedirectToLogin => html! { <Redirect<Route> to={Route::Login} /> },
        GuardDecision::RedirectToHome => html! { <Redirect<Route> to={Route::Home} /> },
        GuardDecision::Allow => match props.route {
            Route::Home => html! { <HomePage /> },
            Route::Login => html! { <LoginPage /> },
            Route::Contacts => html! { <ContactsPage /> },
            Route::ContactGroups => html! { <ContactGroupsPage /> },
            Route::Triggers => html! { <TriggersPage /> },
            Route::CallLogs => html! { <CallLogsPage /> },
            Route::EmailEvents => html! { <EmailEventsPage /> },
            Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
        },
    }
}

#[function_component(LoginPage)]
fn login_page() -> Html {
    let navigator = use_navigator();

    let on_login = Callback::from(move |_| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Home);
        }
    });

    html! {
        <LoginForm {on_login} />
    }
}

#[function_component(AppRouter)]
fn app_router() -> Html {
    let authenticated = use_auth().map(|auth| auth.authenticated).unwrap_or(false);

    // Signed-out visitors only ever see the login view, without the shell
    if !authenticated {
        return html! {
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        };
    }

    html! {
        <BrowserRouter>
            <Layout>
                <Switch<Route> render={switch} />
            </Layout>
        </BrowserRouter>
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| Config::from_build_env());
    let client = ApiClient::new(&config);

    html! {
        <ContextProvider<ApiClient> context={client}>
            <AuthProvider token_key={config.token_storage_key.clone()}>
                <AppRouter />
            </AuthProvider>
        </ContextProvider<ApiClient>>
    }
}

fn load_stylesheet(href: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no head"))?;

    let link = document.create_element("link")?;
    link.set_attribute("href", href)?;
    link.set_attribute("rel", "stylesheet")?;
    head.append_child(&link)?;
    Ok(())
}

fn main() {
    logging::init();

    if let Err(error) = load_stylesheet(TAILWIND_CSS) {
        tracing::warn!("could not load stylesheet: {:?}", error);
    }

    tracing::info!("starting CallWatch dashboard");
    yew::Renderer::<App>::new().render();
}
