use std::sync::{Arc, Mutex};

use contact_import::ImportError;
use contact_import::observability::{
    CompositeObserver, ImportContext, ImportObserver, ImportSeverity, ImportStats, ImportVariant,
    TracingObserver,
};

#[derive(Default)]
struct CountingObserver {
    events: Mutex<Vec<&'static str>>,
}

impl ImportObserver for CountingObserver {
    fn on_success(&self, _ctx: &ImportContext, _stats: ImportStats) {
        self.events.lock().unwrap().push("success");
    }

    fn on_failure(&self, _ctx: &ImportContext, _severity: ImportSeverity, _error: &ImportError) {
        self.events.lock().unwrap().push("failure");
    }
}

fn ctx() -> ImportContext {
    ImportContext {
        filename: "contacts.csv".to_string(),
        folder_id: "folder-1".to_string(),
        variant: ImportVariant::ServerParsed,
    }
}

#[test]
fn composite_fans_out_and_default_alert_forwards_to_failure() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("contact_import=debug")
        .with_test_writer()
        .try_init();

    let a = Arc::new(CountingObserver::default());
    let b = Arc::new(CountingObserver::default());
    let composite = CompositeObserver::new(vec![
        a.clone() as Arc<dyn ImportObserver>,
        b.clone() as Arc<dyn ImportObserver>,
        Arc::new(TracingObserver) as Arc<dyn ImportObserver>,
    ]);

    composite.on_success(
        &ctx(),
        ImportStats {
            successful: 3,
            failed: 1,
            skipped: 0,
        },
    );
    let err = ImportError::Timeout(std::time::Duration::from_secs(60));
    composite.on_alert(&ctx(), ImportSeverity::for_error(&err), &err);

    assert_eq!(*a.events.lock().unwrap(), vec!["success", "failure"]);
    assert_eq!(*b.events.lock().unwrap(), vec!["success", "failure"]);
}

#[test]
fn severity_classification() {
    assert_eq!(
        ImportSeverity::for_error(&ImportError::Cancelled),
        ImportSeverity::Info
    );
    assert_eq!(
        ImportSeverity::for_error(&ImportError::Http {
            status: 502,
            body: String::new()
        }),
        ImportSeverity::Critical
    );
    assert_eq!(
        ImportSeverity::for_error(&ImportError::UnsupportedFormat {
            declared: "pdf".to_string()
        }),
        ImportSeverity::Error
    );
}
