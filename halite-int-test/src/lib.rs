pub mod test_util;

// Setup only one time throughout the project.
// It will take effect during test, project wide
#[ctor::ctor]
fn init() {
    colog::init();
}
