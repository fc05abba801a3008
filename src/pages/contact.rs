use std::sync::Arc;
use std::sync::mpsc;

use super::reveal::{CONTENT_SLIDE, Reveal, RevealConfig, TITLE_SPLIT};
use crate::mail::{MailConfig, Mailer, Message};

const ERR_NAME: &str = "Please type in your name";
const ERR_EMAIL: &str = "Please type in a valid email";
const ERR_MESSAGE: &str = "Please type your message";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    pub fn any(&self) -> bool {
        self.name.is_some() || self.email.is_some() || self.message.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryBanner {
    Success,
    Failure,
}

/// The contact form's state machine, kept free of UI so the submission
/// contract is testable: validation blocks the send and marks exactly
/// the missing fields; a valid submit emits one payload and refuses a
/// second until the outcome arrives; success clears the fields, failure
/// keeps them.
#[derive(Debug, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub errors: FieldErrors,
    pub banner: Option<DeliveryBanner>,
    in_flight: bool,
}

impl ContactForm {
    fn validate(&self) -> FieldErrors {
        FieldErrors {
            name: self.name.trim().is_empty().then_some(ERR_NAME),
            email: self.email.trim().is_empty().then_some(ERR_EMAIL),
            message: self.message.trim().is_empty().then_some(ERR_MESSAGE),
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Try to submit. Returns the payload to deliver, or `None` when
    /// validation failed or a delivery is already in flight.
    pub fn submit(&mut self) -> Option<Message> {
        if self.in_flight {
            return None;
        }
        self.banner = None;
        self.errors = self.validate();
        if self.errors.any() {
            return None;
        }
        self.in_flight = true;
        Some(Message {
            user_name: self.name.clone(),
            user_email: self.email.clone(),
            user_message: self.message.clone(),
        })
    }

    /// Apply the delivery outcome. Success clears the fields; failure
    /// retains them so nothing typed is lost.
    pub fn resolve(&mut self, outcome: Result<(), String>) {
        self.in_flight = false;
        match outcome {
            Ok(()) => {
                self.banner = Some(DeliveryBanner::Success);
                self.name.clear();
                self.email.clear();
                self.message.clear();
            }
            Err(error) => {
                log::error!("contact form delivery failed: {error}");
                self.banner = Some(DeliveryBanner::Failure);
            }
        }
    }
}

pub struct ContactPage {
    pub form: ContactForm,
    title: Reveal,
    blocks: Reveal,
    mailer: Arc<dyn Mailer>,
    outcome_rx: Option<mpsc::Receiver<Result<(), String>>>,
}

impl ContactPage {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self {
            form: ContactForm::default(),
            title: Reveal::new(TITLE_SPLIT),
            blocks: Reveal::new(RevealConfig {
                delay: 1.0,
                ..CONTENT_SLIDE
            }),
            mailer,
            outcome_rx: None,
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.title.step(dt);
        self.blocks.step(dt);
    }

    /// Drain the delivery outcome, if one arrived since last frame.
    pub fn poll(&mut self) {
        let Some(rx) = &self.outcome_rx else { return };
        match rx.try_recv() {
            Ok(outcome) => {
                self.form.resolve(outcome);
                self.outcome_rx = None;
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.form.resolve(Err("delivery task vanished".to_string()));
                self.outcome_rx = None;
            }
        }
    }

    fn dispatch(&mut self, message: Message, runtime: &tokio::runtime::Handle) {
        let (tx, rx) = mpsc::channel();
        self.outcome_rx = Some(rx);
        let mailer = Arc::clone(&self.mailer);
        runtime.spawn_blocking(move || {
            // Identifiers come from the environment at submit time; a
            // missing one fails here and surfaces as the failure banner.
            let outcome = MailConfig::from_env()
                .and_then(|config| mailer.deliver(&config, &message))
                .map_err(|e| e.to_string());
            let _ = tx.send(outcome);
        });
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, runtime: &tokio::runtime::Handle) {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            self.title.split_text(
                ui,
                "Let's collaborate",
                egui::FontId::proportional(48.0),
                ui.visuals().strong_text_color(),
            );
        });

        ui.add_space(24.0);
        let mut submitted = false;
        self.blocks.show(ui, 0, |ui| {
            ui.vertical_centered(|ui| {
                ui.set_max_width(480.0);

                field(ui, "Your name", &mut self.form.name, self.form.errors.name, false);
                ui.add_space(14.0);
                field(ui, "Your email", &mut self.form.email, self.form.errors.email, false);
                ui.add_space(14.0);
                field(
                    ui,
                    "Your project requirements",
                    &mut self.form.message,
                    self.form.errors.message,
                    true,
                );

                ui.add_space(18.0);
                let send = ui.add_enabled(!self.form.in_flight(), egui::Button::new("Send"));
                if send.clicked() {
                    submitted = true;
                }

                ui.add_space(10.0);
                match self.form.banner {
                    Some(DeliveryBanner::Success) => {
                        ui.colored_label(
                            egui::Color32::from_rgb(22, 163, 74),
                            "Your message has been delivered 👍",
                        );
                    }
                    Some(DeliveryBanner::Failure) => {
                        ui.colored_label(
                            egui::Color32::from_rgb(239, 68, 68),
                            "Something went wrong. Please try again.",
                        );
                    }
                    None => {}
                }
            });
        });

        if submitted
            && let Some(message) = self.form.submit()
        {
            self.dispatch(message, runtime);
        }
    }
}

fn field(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    error: Option<&'static str>,
    multiline: bool,
) {
    ui.horizontal(|ui| {
        ui.label(label);
        if let Some(message) = error {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(egui::Color32::from_rgb(239, 68, 68), message);
            });
        }
    });
    if multiline {
        ui.add(
            egui::TextEdit::multiline(value)
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );
    } else {
        ui.add(egui::TextEdit::singleline(value).desired_width(f32::INFINITY));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FolioResult;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        deliveries: Mutex<Vec<(MailConfig, Message)>>,
    }

    impl Mailer for RecordingMailer {
        fn deliver(&self, config: &MailConfig, message: &Message) -> FolioResult<()> {
            self.deliveries
                .lock()
                .unwrap()
                .push((config.clone(), message.clone()));
            Ok(())
        }
    }

    fn filled_form() -> ContactForm {
        ContactForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Build me an engine".to_string(),
            ..ContactForm::default()
        }
    }

    #[test]
    fn empty_fields_block_submission_with_exact_messages() {
        let mut form = ContactForm {
            email: "ada@example.com".to_string(),
            ..ContactForm::default()
        };
        assert!(form.submit().is_none());
        assert_eq!(form.errors.name, Some(ERR_NAME));
        assert_eq!(form.errors.email, None);
        assert_eq!(form.errors.message, Some(ERR_MESSAGE));
        assert!(!form.in_flight());
    }

    #[test]
    fn all_fields_missing_yields_all_three_messages() {
        let mut form = ContactForm::default();
        assert!(form.submit().is_none());
        assert_eq!(form.errors.name, Some(ERR_NAME));
        assert_eq!(form.errors.email, Some(ERR_EMAIL));
        assert_eq!(form.errors.message, Some(ERR_MESSAGE));
    }

    #[test]
    fn valid_submit_emits_mapped_payload_exactly_once() {
        let mut form = filled_form();
        let message = form.submit().expect("valid form should submit");
        assert_eq!(message.user_name, "Ada");
        assert_eq!(message.user_email, "ada@example.com");
        assert_eq!(message.user_message, "Build me an engine");
        // In flight: a second click must not produce a second payload.
        assert!(form.submit().is_none());
    }

    #[test]
    fn recording_mailer_sees_one_delivery_with_form_values() {
        let mailer = RecordingMailer::default();
        let config = MailConfig {
            service_id: "svc".to_string(),
            template_id: "tpl".to_string(),
            public_key: "key".to_string(),
        };
        let mut form = filled_form();
        let message = form.submit().unwrap();
        mailer.deliver(&config, &message).unwrap();

        let deliveries = mailer.deliveries.lock().unwrap();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].1.user_name, "Ada");
        assert_eq!(deliveries[0].0.service_id, "svc");
    }

    #[test]
    fn success_clears_fields_and_shows_banner() {
        let mut form = filled_form();
        form.submit().unwrap();
        form.resolve(Ok(()));
        assert_eq!(form.banner, Some(DeliveryBanner::Success));
        assert!(form.name.is_empty());
        assert!(form.email.is_empty());
        assert!(form.message.is_empty());
        assert!(!form.in_flight());
    }

    #[test]
    fn failure_keeps_fields_and_shows_banner() {
        let mut form = filled_form();
        form.submit().unwrap();
        form.resolve(Err("HTTP 400".to_string()));
        assert_eq!(form.banner, Some(DeliveryBanner::Failure));
        assert_eq!(form.name, "Ada");
        assert_eq!(form.message, "Build me an engine");
        assert!(!form.in_flight());
    }

    #[test]
    fn submit_allowed_again_after_outcome() {
        let mut form = filled_form();
        form.submit().unwrap();
        form.resolve(Err("HTTP 500".to_string()));
        assert!(form.submit().is_some());
    }

    #[test]
    fn banner_resets_on_next_submit_attempt() {
        let mut form = filled_form();
        form.submit().unwrap();
        form.resolve(Ok(()));
        form.name = "Ada".to_string();
        assert!(form.submit().is_none());
        assert_eq!(form.banner, None);
    }
}
