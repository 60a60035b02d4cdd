pub mod certificate_card;
pub mod certificate_form_modal;
pub mod dashboard;
pub mod file_intake_modal;
pub mod header;
pub mod login_form;
pub mod notification_banner;
pub mod template_picker_modal;
