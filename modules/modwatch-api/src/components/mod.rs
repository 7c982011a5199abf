mod forms;
mod home;
mod layout;
mod progress;

pub use forms::render_submission_form;
pub use home::render_home;
pub use progress::render_progress;
