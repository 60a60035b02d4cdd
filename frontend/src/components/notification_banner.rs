use shared::{Notification, NotificationKind};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NotificationBannerProps {
    pub notification: Option<Notification>,
}

#[function_component(NotificationBanner)]
pub fn notification_banner(props: &NotificationBannerProps) -> Html {
    let Some(notification) = props.notification.as_ref() else {
        return html! {};
    };

    let class = match notification.kind {
        NotificationKind::Success => "notification success",
        NotificationKind::Error => "notification error",
    };

    html! {
        <div class={class} role="status">
            {notification.message.clone()}
        </div>
    }
}
