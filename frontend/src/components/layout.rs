use yew::prelude::*;
use yew_router::prelude::*;

use super::auth::use_auth;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Html,
}

/// Shell around every signed-in view: header, collapsible sidebar, content.
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let auth = use_auth();
    let current_route = use_route::<Route>().unwrap_or(Route::Home);
    let sidebar_collapsed = use_state(|| false);

    let toggle_sidebar = {
        let sidebar_collapsed = sidebar_collapsed.clone();
        Callback::from(move |_| sidebar_collapsed.set(!*sidebar_collapsed))
    };

    let on_logout = Callback::from(move |_: MouseEvent| {
        if let Some(auth) = &auth {
            auth.logout();
        }
    });

    let sidebar_width = if *sidebar_collapsed { "w-16" } else { "w-64" };

    html! {
        <div class="min-h-screen bg-gray-900 flex flex-col">
            <header class="bg-gray-800 border-b border-gray-700 h-14 flex-shrink-0 z-50">
                <div class="h-full flex items-center justify-between px-4">
                    <div class="flex items-center space-x-2">
                        <div class="w-8 h-8 bg-blue-500 rounded flex items-center justify-center">
                            <span class="text-white font-bold text-lg">{"C"}</span>
                        </div>
                        if !*sidebar_collapsed {
                            <span class="text-white font-semibold text-lg">{"CallWatch"}</span>
                        }
                    </div>

                    <button
                        onclick={on_logout}
                        class="text-red-400 hover:text-red-300 px-3 py-1.5 rounded-lg hover:bg-gray-700 text-sm font-medium"
                    >
                        {"Sign Out"}
                    </button>
                </div>
            </header>

            <div class="flex flex-1 overflow-hidden">
                <aside class={format!("bg-gray-800 border-r border-gray-700 flex-shrink-0 transition-all duration-200 {}", sidebar_width)}>
                    <div class="h-full flex flex-col">
                        <div class="p-2 border-b border-gray-700">
                            <button
                                onclick={toggle_sidebar}
                                class="w-full text-gray-400 hover:text-white p-2 rounded hover:bg-gray-700"
                            >
                                if *sidebar_collapsed {
                                    <svg class="w-5 h-5 mx-auto" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M13 5l7 7-7 7M5 5l7 7-7 7"/>
                                    </svg>
                                } else {
                                    <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M11 19l-7-7 7-7m8 14l-7-7 7-7"/>
                                    </svg>
                                }
                            </button>
                        </div>

                        <nav class="flex-1 overflow-y-auto py-4">
                            <SidebarSection title="Overview" collapsed={*sidebar_collapsed}>
                                <SidebarLink route={Route::Home} icon="home" label="Home" collapsed={*sidebar_collapsed} current={current_route.clone()} />
                            </SidebarSection>

                            <SidebarSection title="Configuration" collapsed={*sidebar_collapsed}>
                                <SidebarLink route={Route::Contacts} icon="user" label="Contacts" collapsed={*sidebar_collapsed} current={current_route.clone()} />
                                <SidebarLink route={Route::ContactGroups} icon="users" label="Contact Groups" collapsed={*sidebar_collapsed} current={current_route.clone()} />
                                <SidebarLink route={Route::Triggers} icon="bolt" label="Triggers" collapsed={*sidebar_collapsed} current={current_route.clone()} />
                            </SidebarSection>

                            <SidebarSection title="History" collapsed={*sidebar_collapsed}>
                                <SidebarLink route={Route::CallLogs} icon="phone" label="Call Logs" collapsed={*sidebar_collapsed} current={current_route.clone()} />
                                <SidebarLink route={Route::EmailEvents} icon="mail" label="Email Events" collapsed={*sidebar_collapsed} current={current_route.clone()} />
                            </SidebarSection>
                        </nav>
                    </div>
                </aside>

                <main class="flex-1 overflow-auto bg-gray-900">
                    { props.children.clone() }
                </main>
            </div>
        </div>
    }
}

// ===== HELPER COMPONENTS =====

#[derive(Properties, PartialEq)]
struct SidebarSectionProps {
    title: &'static str,
    collapsed: bool,
    children: Html,
}

#[function_component(SidebarSection)]
fn sidebar_section(props: &SidebarSectionProps) -> Html {
    html! {
        <div class="mb-6">
            if !props.collapsed {
                <h3 class="px-4 text-xs font-semibold text-gray-500 uppercase tracking-wider mb-2">
                    {props.title}
                </h3>
            }
            <div class="space-y-1 px-2">
                {props.children.clone()}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarLinkProps {
    route: Route,
    icon: &'static str,
    label: &'static str,
    collapsed: bool,
    current: Route,
}

#[function_component(SidebarLink)]
fn sidebar_link(props: &SidebarLinkProps) -> Html {
    let is_active = props.route == props.current;
    let classes = if is_active {
        "flex items-center px-3 py-2 rounded-lg bg-blue-600 text-white"
    } else {
        "flex items-center px-3 py-2 rounded-lg text-gray-300 hover:bg-gray-700 hover:text-white"
    };

    let icon = match props.icon {
        "home" => html! {
            <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M3 12l2-2m0 0l7-7 7 7M5 10v10a1 1 0 001 1h3m10-11l2 2m-2-2v10a1 1 0 01-1 1h-3m-6 0a1 1 0 001-1v-4a1 1 0 011-1h2a1 1 0 011 1v4a1 1 0 001 1m-6 0h6"/>
            </svg>
        },
        "user" => html! {
            <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M16 7a4 4 0 11-8 0 4 4 0 018 0zM12 14a7 7 0 00-7 7h14a7 7 0 00-7-7z"/>
            </svg>
        },
        "users" => html! {
            <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M12 4.354a4 4 0 110 5.292M15 21H3v-1a6 6 0 0112 0v1zm0 0h6v-1a6 6 0 00-9-5.197M13 7a4 4 0 11-8 0 4 4 0 018 0z"/>
            </svg>
        },
        "bolt" => html! {
            <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M13 10V3L4 14h7v7l9-11h-7z"/>
            </svg>
        },
        "phone" => html! {
            <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M3 5a2 2 0 012-2h3.28a1 1 0 01.948.684l1.498 4.493a1 1 0 01-.502 1.21l-2.257 1.13a11.042 11.042 0 005.516 5.516l1.13-2.257a1 1 0 011.21-.502l4.493 1.498a1 1 0 01.684.949V19a2 2 0 01-2 2h-1C9.716 21 3 14.284 3 6V5z"/>
            </svg>
        },
        "mail" => html! {
            <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M3 8l7.89 5.26a2 2 0 002.22 0L21 8M5 19h14a2 2 0 002-2V7a2 2 0 00-2-2H5a2 2 0 00-2 2v10a2 2 0 002 2z"/>
            </svg>
        },
        _ => html! { <span class="w-5 h-5"></span> },
    };

    html! {
        <Link<Route> to={props.route.clone()} classes={classes}>
            {icon}
            if !props.collapsed {
                <span class="ml-3">{props.label}</span>
            }
        </Link<Route>>
    }
}
