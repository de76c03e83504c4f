use halite::errors::HaliteResult;
use halite::Halite;
use std::{env, fs};

/// Runs a test with error handling and best-effort cleanup.
/// Tests run on the current thread; the context is created by `before`,
/// handed to `test`, and released by `after` even when the test fails.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> HaliteResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    B: Fn() -> HaliteResult<TestContext> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
    A: Fn(TestContext) -> HaliteResult<()> + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    let result = std::panic::catch_unwind(|| {
        let ctx_result = before();
        match ctx_result {
            Ok(ctx) => {
                let test_result = test(ctx.clone());
                match test_result {
                    Ok(_) => {
                        let after_result = after(ctx.clone());
                        match after_result {
                            Ok(_) => Ok(()),
                            Err(e) => Err(format!("After run failed: {:?}", e)),
                        }
                    }
                    Err(e) => {
                        let _ = after(ctx.clone());
                        Err(format!("Test failed: {:?}", e))
                    }
                }
            }
            Err(e) => Err(format!("Before run failed: {:?}", e)),
        }
    });

    match result {
        Ok(Ok(_)) => {}
        Ok(Err(message)) => panic!("{}", message),
        Err(panic_err) => std::panic::resume_unwind(panic_err),
    }
}

#[derive(Clone)]
pub struct TestContext {
    path: String,
    db: Halite,
}

impl TestContext {
    pub fn new(path: String, db: Halite) -> Self {
        Self { path, db }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn db(&self) -> Halite {
        self.db.clone()
    }
}

pub fn random_path() -> String {
    let id = uuid::Uuid::new_v4();
    let temp_dir = env::temp_dir();
    temp_dir.join(id.to_string()).to_str().unwrap().to_string()
}

pub fn create_test_context() -> HaliteResult<TestContext> {
    let path = random_path();
    fs::create_dir_all(&path)?;

    let db = Halite::connect(&path)?;
    Ok(TestContext::new(path, db))
}

pub fn cleanup(ctx: TestContext) -> HaliteResult<()> {
    match fs::remove_dir_all(ctx.path()) {
        Ok(()) => Ok(()),
        // already cleaned up
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
