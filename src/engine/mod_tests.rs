use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use crate::checker::Position;
use crate::error::{CheckerError, ErrorKind};

use super::*;

struct ListChecker {
    name: &'static str,
    problems: Vec<Problem>,
    calls: AtomicUsize,
}

impl ListChecker {
    fn new(name: &'static str, count: usize) -> Self {
        let problems = (1..=count)
            .map(|line| {
                Problem::new(
                    Position::new(format!("{name}/file.go"), line, 1),
                    "SA0000",
                    format!("{name} problem {line}"),
                )
            })
            .collect();
        Self {
            name,
            problems,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Checker for ListChecker {
    fn name(&self) -> &str {
        self.name
    }

    fn check(
        &self,
        _packages: &[Package],
        _ctx: &CheckerContext<'_>,
    ) -> std::result::Result<Vec<Problem>, CheckerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.problems.clone())
    }
}

struct FailingChecker {
    fail_in_init: bool,
}

impl Checker for FailingChecker {
    fn name(&self) -> &str {
        "broken"
    }

    fn init(
        &self,
        _packages: &[Package],
        _ctx: &CheckerContext<'_>,
    ) -> std::result::Result<(), CheckerError> {
        if self.fail_in_init {
            return Err(CheckerError::Failed("cannot build ssa".to_string()));
        }
        Ok(())
    }

    fn check(
        &self,
        _packages: &[Package],
        _ctx: &CheckerContext<'_>,
    ) -> std::result::Result<Vec<Problem>, CheckerError> {
        Err(CheckerError::Failed("analysis crashed".to_string()))
    }
}

/// Tracks how many instances run at the same time.
struct ConcurrencyTracker {
    name: String,
    active: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl Checker for ConcurrencyTracker {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(
        &self,
        _packages: &[Package],
        _ctx: &CheckerContext<'_>,
    ) -> std::result::Result<Vec<Problem>, CheckerError> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(vec![Problem::new(
            Position::new(format!("{}.go", self.name), 1, 1),
            "U1000",
            "tracked",
        )])
    }
}

/// Remembers the target version it was handed in `init` and `check`.
struct VersionRecorder {
    seen_in_init: AtomicU32,
    seen_in_check: AtomicU32,
}

impl Checker for VersionRecorder {
    fn name(&self) -> &str {
        "versioned"
    }

    fn init(
        &self,
        _packages: &[Package],
        ctx: &CheckerContext<'_>,
    ) -> std::result::Result<(), CheckerError> {
        self.seen_in_init.store(ctx.target_version, Ordering::SeqCst);
        Ok(())
    }

    fn check(
        &self,
        _packages: &[Package],
        ctx: &CheckerContext<'_>,
    ) -> std::result::Result<Vec<Problem>, CheckerError> {
        self.seen_in_check.store(ctx.target_version, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

fn packages() -> Vec<Package> {
    vec![Package::new("example.com/a", "a", vec!["a/a.go".into()])]
}

fn trackers(count: usize) -> (Vec<Arc<dyn Checker>>, Arc<AtomicUsize>) {
    let active = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let checkers = (0..count)
        .map(|i| {
            Arc::new(ConcurrencyTracker {
                name: format!("worker{i}"),
                active: Arc::clone(&active),
                peak: Arc::clone(&peak),
            }) as Arc<dyn Checker>
        })
        .collect();
    (checkers, peak)
}

#[test]
fn no_checkers_is_empty_success() {
    let output = Engine::new(Vec::new())
        .run(&packages(), &Options::default())
        .unwrap();
    assert!(output.problems.is_empty());
    assert!(output.stats.is_empty());
}

#[test]
fn no_checkers_skips_ignore_parsing() {
    let options = Options::default().with_ignores("badtoken");
    assert!(Engine::new(Vec::new()).run(&packages(), &options).is_ok());
}

#[test]
fn no_packages_is_empty_success_without_invoking_checkers() {
    let checker = Arc::new(ListChecker::new("unused", 2));
    let engine = Engine::new(vec![checker.clone() as Arc<dyn Checker>]);

    let output = engine.run(&[], &Options::default()).unwrap();

    assert!(output.problems.is_empty());
    assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn malformed_ignores_fail_before_any_checker_runs() {
    let checker = Arc::new(ListChecker::new("unused", 2));
    let engine = Engine::new(vec![checker.clone() as Arc<dyn Checker>]);
    let options = Options::default().with_ignores("a:b:c");

    let err = engine.run(&packages(), &options).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Config);
    assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn problems_concatenate_in_checker_order() {
    let engine = Engine::new(vec![
        Arc::new(ListChecker::new("unused", 2)),
        Arc::new(ListChecker::new("gosimple", 3)),
    ]);

    let output = engine.run(&packages(), &Options::default()).unwrap();

    let messages: Vec<_> = output.problems.iter().map(|p| p.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "unused problem 1",
            "unused problem 2",
            "gosimple problem 1",
            "gosimple problem 2",
            "gosimple problem 3",
        ]
    );
}

#[test]
fn failing_checker_fails_whole_run() {
    let good = Arc::new(ListChecker::new("unused", 5));
    let engine = Engine::new(vec![
        good,
        Arc::new(FailingChecker {
            fail_in_init: false,
        }),
    ]);

    let err = engine.run(&packages(), &Options::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Checker);
    assert_eq!(err.checker_name(), Some("broken"));
    assert_eq!(err.to_string(), "failed to run broken: analysis crashed");
}

#[test]
fn init_failure_is_wrapped_with_checker_name() {
    let engine = Engine::new(vec![Arc::new(FailingChecker { fail_in_init: true })]);

    let err = engine.run(&packages(), &Options::default()).unwrap_err();

    assert_eq!(err.to_string(), "failed to run broken: cannot build ssa");
}

#[test]
fn ignored_problems_are_dropped() {
    let engine = Engine::new(vec![Arc::new(ListChecker::new("unused", 2))]);
    let options = Options::default().with_ignores("unused/*.go:SA0000");

    let output = engine.run(&packages(), &options).unwrap();

    assert!(output.problems.is_empty());
}

#[test]
fn ignored_problems_are_flagged_when_returned() {
    let engine = Engine::new(vec![
        Arc::new(ListChecker::new("unused", 1)),
        Arc::new(ListChecker::new("gosimple", 1)),
    ]);
    let options = Options::default()
        .with_ignores("unused/*.go:SA0000")
        .with_return_ignored(true);

    let output = engine.run(&packages(), &options).unwrap();

    assert_eq!(output.problems.len(), 2);
    assert!(output.problems[0].ignored);
    assert!(!output.problems[1].ignored);
}

#[test]
fn stats_recorded_per_checker_in_checker_order() {
    let engine = Engine::new(vec![
        Arc::new(ListChecker::new("unused", 1)),
        Arc::new(ListChecker::new("stylecheck", 1)),
    ]);

    let output = engine.run(&packages(), &Options::default()).unwrap();

    let inits: Vec<_> = output.stats.checker_inits().keys().cloned().collect();
    let runs: Vec<_> = output.stats.checker_runs().keys().cloned().collect();
    assert_eq!(inits, vec!["unused", "stylecheck"]);
    assert_eq!(runs, vec!["unused", "stylecheck"]);
}

#[test]
fn single_job_never_runs_checkers_concurrently() {
    let (checkers, peak) = trackers(4);
    let options = Options::default().with_max_concurrent_jobs(1);

    Engine::new(checkers).run(&packages(), &options).unwrap();

    assert_eq!(peak.load(Ordering::SeqCst), 1);
}

#[test]
fn concurrency_never_exceeds_bound() {
    let (checkers, peak) = trackers(6);
    let options = Options::default().with_max_concurrent_jobs(2);

    Engine::new(checkers).run(&packages(), &options).unwrap();

    let peak = peak.load(Ordering::SeqCst);
    assert!((1..=2).contains(&peak), "peak concurrency {peak}");
}

#[test]
fn result_set_is_independent_of_job_count() {
    let (sequential_checkers, _) = trackers(5);
    let (parallel_checkers, _) = trackers(5);

    let sequential = Engine::new(sequential_checkers)
        .run(&packages(), &Options::default().with_max_concurrent_jobs(1))
        .unwrap();
    let parallel = Engine::new(parallel_checkers)
        .run(&packages(), &Options::default().with_max_concurrent_jobs(5))
        .unwrap();

    let mut left: Vec<_> = sequential.problems.iter().map(|p| p.position.clone()).collect();
    let mut right: Vec<_> = parallel.problems.iter().map(|p| p.position.clone()).collect();
    left.sort_by(|a, b| a.filename.cmp(&b.filename));
    right.sort_by(|a, b| a.filename.cmp(&b.filename));
    assert_eq!(left, right);
}

#[test]
fn debug_lists_checker_names() {
    let engine = Engine::new(vec![Arc::new(ListChecker::new("unused", 0))]);
    assert_eq!(format!("{engine:?}"), r#"Engine { checkers: ["unused"] }"#);
}

#[test]
fn checkers_receive_target_version() {
    let checker = Arc::new(VersionRecorder {
        seen_in_init: AtomicU32::new(0),
        seen_in_check: AtomicU32::new(0),
    });
    let engine = Engine::new(vec![checker.clone() as Arc<dyn Checker>]);
    let options = Options::default().with_target_version(21);

    engine.run(&packages(), &options).unwrap();

    assert_eq!(checker.seen_in_init.load(Ordering::SeqCst), 21);
    assert_eq!(checker.seen_in_check.load(Ordering::SeqCst), 21);
}

#[test]
fn checkers_receive_default_target_version() {
    let checker = Arc::new(VersionRecorder {
        seen_in_init: AtomicU32::new(0),
        seen_in_check: AtomicU32::new(0),
    });
    let engine = Engine::new(vec![checker.clone() as Arc<dyn Checker>]);

    engine.run(&packages(), &Options::default()).unwrap();

    assert_eq!(
        checker.seen_in_check.load(Ordering::SeqCst),
        crate::config::DEFAULT_TARGET_VERSION
    );
}

#[test]
fn print_stats_writes_both_sections_for_every_checker() {
    let engine = Engine::new(vec![
        Arc::new(ListChecker::new("unused", 1)),
        Arc::new(ListChecker::new("stylecheck", 1)),
    ]);
    let options = Options::default().with_print_stats(true);
    let mut buffer = Vec::new();

    engine
        .run_with_writer(&packages(), &options, &mut buffer)
        .unwrap();

    let output = String::from_utf8(buffer).unwrap();
    let (inits, runs) = output.split_once("Checker runs:\n").unwrap();
    assert!(inits.starts_with("Checker inits:\n"));
    for name in ["unused", "stylecheck"] {
        assert!(inits.contains(&format!("\t{name}: ")), "{output}");
        assert!(runs.contains(&format!("\t{name}: ")), "{output}");
    }
}

#[test]
fn print_stats_off_writes_nothing() {
    let engine = Engine::new(vec![Arc::new(ListChecker::new("unused", 1))]);
    let mut buffer = Vec::new();

    engine
        .run_with_writer(&packages(), &Options::default(), &mut buffer)
        .unwrap();

    assert!(buffer.is_empty());
}

#[test]
fn print_stats_writes_nothing_when_run_fails() {
    let engine = Engine::new(vec![Arc::new(FailingChecker {
        fail_in_init: false,
    })]);
    let options = Options::default().with_print_stats(true);
    let mut buffer = Vec::new();

    assert!(
        engine
            .run_with_writer(&packages(), &options, &mut buffer)
            .is_err()
    );
    assert!(buffer.is_empty());
}

#[test]
fn timings_survive_poisoned_stats_lock() {
    let stats = Mutex::new(PerfStats::default());
    let _ = thread::scope(|scope| {
        scope
            .spawn(|| {
                let _guard = stats.lock().unwrap();
                panic!("poison the stats lock");
            })
            .join()
    });
    assert!(stats.is_poisoned());

    let config = crate::config::CheckerConfig::default();
    let ctx = CheckerContext::new(11, &config);
    let checker = ListChecker::new("unused", 1);
    let problems = run_checker(&checker, &packages(), &ctx, &stats).unwrap();

    assert_eq!(problems.len(), 1);
    let stats = stats.into_inner().unwrap_or_else(PoisonError::into_inner);
    assert!(stats.run_duration("unused").is_some());
    assert!(stats.init_duration("unused").is_some());
}
