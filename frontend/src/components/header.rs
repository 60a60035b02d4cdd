use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub email: String,
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    html! {
        <header class="dashboard-header">
            <div class="brand">
                <div class="brand-mark">{"CH"}</div>
                <div>
                    <h1>{"CredHex Dashboard"}</h1>
                    <p class="welcome">{format!("Welcome back, {}", props.email)}</p>
                </div>
            </div>
            <button class="btn btn-danger" onclick={on_logout}>{"Logout"}</button>
        </header>
    }
}
