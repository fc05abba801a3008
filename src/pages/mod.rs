mod about;
mod contact;
mod home;
mod projects;
mod reveal;

pub use about::AboutPage;
pub use contact::ContactPage;
pub use home::HomePage;
pub use projects::ProjectsPage;

use crate::mail::Mailer;
use crate::router::Route;
use std::sync::Arc;

/// State of the one mounted page. Swapping routes drops the old page,
/// which releases its timelines, trigger regions and any pending async
/// work on every exit path.
pub enum ActivePage {
    Home(HomePage),
    About(Box<AboutPage>),
    Projects(ProjectsPage),
    Contact(ContactPage),
}

impl ActivePage {
    pub fn mount(
        route: Route,
        runtime: &tokio::runtime::Handle,
        model_source: &str,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        match route {
            Route::Home => Self::Home(HomePage::new()),
            Route::About => Self::About(Box::new(AboutPage::new(runtime, model_source))),
            Route::Projects => Self::Projects(ProjectsPage::new()),
            Route::Contact => Self::Contact(ContactPage::new(mailer)),
        }
    }
}
