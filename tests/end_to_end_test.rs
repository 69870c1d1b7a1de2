use rutest::runner::{Status, TestReporter, TestSummary};
use rutest::config::OutputConfig;
use rutest::{
    RaisedError, TestClass, TestContext, TestOutcome, TestResult, TestRunner, TestSource,
    discover_all, discover_tests,
};

fn add(x: i32, y: i32) -> i32 {
    x + y
}

fn run_source(source: TestSource) -> Vec<TestResult> {
    let units = discover_tests(source).unwrap();
    TestRunner::new().run_all(&units)
}

fn render(results: &[TestResult]) -> String {
    let reporter = TestReporter::new(&OutputConfig {
        colour: false,
        indent_size: 4,
    });
    let mut out = Vec::new();
    reporter.print_results(&mut out, results).unwrap();
    String::from_utf8(out).unwrap()
}

fn numbers_test() -> TestSource {
    TestSource::new("numbers_test")
        .function("test_add", 6, |t| {
            let actual = add(2, 3);
            if actual != 5 {
                t.fail(&format!("expected 2 + 3 to be 5, got {}", actual), false)?;
            }
            Ok(())
        })
        .function("test_sub", 13, |t| t.assert_equal(2 - 3, 5, "disappointing", false))
        .function("test_multiple_failures", 21, |t| {
            t.fail("failure message 1", false)?;
            t.fail("", false)?;
            t.fail("failure message 2", false)
        })
}

/// 测试文件发现、执行、格式化的完整流程
#[test]
fn test_numbers_source_end_to_end() {
    let results = run_source(numbers_test());

    assert_eq!(
        results,
        vec![
            TestResult::pass("test_add"),
            TestResult::fail(
                "test_sub",
                vec!["Expected -1 and 5 to be equal; disappointing".to_string()]
            ),
            TestResult::fail(
                "test_multiple_failures",
                vec![
                    "failure message 1".to_string(),
                    "failure message 2".to_string()
                ]
            ),
        ]
    );

    assert_eq!(
        render(&results),
        "test_add PASS\n\
         test_sub FAIL\n    - Expected -1 and 5 to be equal; disappointing\n\
         test_multiple_failures FAIL\n    - failure message 1\n    - failure message 2\n"
    );
}

#[test]
fn test_class_scenario() {
    let source = TestSource::new("classes_test").class(
        TestClass::<(), ()>::new("TestFoo", 3)
            .method("test_passes", 4, |_, _, _| Ok(()))
            .method("test_fails", 7, |_, _, t| t.fail("oh no!", false)),
    );

    let results = run_source(source);
    assert_eq!(
        results,
        vec![TestResult::Fail {
            name: "TestFoo".to_string(),
            messages: vec![],
            sub_results: vec![
                TestResult::pass("test_passes"),
                TestResult::fail("test_fails", vec!["oh no!".to_string()]),
            ],
        }]
    );
}

#[test]
fn test_class_methods_run_in_definition_order() {
    let source = TestSource::new("order_test").class(
        TestClass::<(), ()>::new("TestOrder", 1)
            .method("test_b", 10, |_, _, _| Ok(()))
            .method("test_a", 5, |_, _, _| Ok(())),
    );

    let results = run_source(source);
    let children: Vec<&str> = results[0].sub_results().iter().map(TestResult::name).collect();
    assert_eq!(children, vec!["test_a", "test_b"]);
}

#[test]
fn test_two_valid_classes() {
    // 只有 TestOne 和 TestTwo 有合格的测试方法
    let source = TestSource::new("two_valid_classes")
        .class(TestClass::<(), ()>::new("TestMissingTestFunction", 8).method("foo", 9, |_, _, _| Ok(())))
        .class(
            TestClass::<(), ()>::new("TestOne", 13)
                .method("test_one", 14, |_, _, t| t.fail("oh no!", false)),
        )
        .class(
            TestClass::<(), ()>::new("NoTestPrefix", 23)
                .method("no_test_prefix", 24, |_, _, t| t.fail("oh no!", false)),
        )
        .class(
            TestClass::<(), ()>::new("TestTwo", 28)
                .method("test_two", 29, |_, _, t| t.fail("oh no!", false)),
        );

    let results = run_source(source);
    let names: Vec<&str> = results.iter().map(TestResult::name).collect();
    assert_eq!(names, vec!["TestOne", "TestTwo"]);
    assert!(results.iter().all(|r| r.status() == Status::Fail));
}

#[derive(Default)]
struct Database {
    rows: Vec<&'static str>,
}

#[derive(Default)]
struct Session {
    touched: bool,
}

#[test]
fn test_setup_failure_on_fourth_of_five_methods() {
    fn test_ok(_: &Database, session: &mut Session, _: &mut TestContext) -> TestOutcome {
        session.touched = true;
        Ok(())
    }

    let source = TestSource::new("lifecycle_test").class(
        TestClass::<Database, Session>::new("TestLifecycle", 1)
            .setup_class(|db| {
                db.rows.push("seed");
                Ok(())
            })
            .setup(|db, session| {
                if session.touched {
                    return Err(RaisedError::msg("instance reused"));
                }
                if db.rows.len() != 1 {
                    return Err(RaisedError::msg("class state lost"));
                }
                Ok(())
            })
            .method("test_1", 2, test_ok)
            .method("test_2", 3, test_ok)
            .method("test_3", 4, test_ok)
            .method("test_4", 5, test_ok)
            .method("test_5", 6, test_ok),
    );
    let results = run_source(source);
    assert!(results[0].is_pass(), "{:?}", results[0]);

    // setup 在第 4 个方法前失败
    let calls = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = calls.clone();
    let source = TestSource::new("lifecycle_test").class(
        TestClass::<Database, Session>::new("TestLifecycle", 1)
            .setup(move |_, _| {
                counter.set(counter.get() + 1);
                if counter.get() == 4 {
                    return Err(RaisedError::msg("setup failed on 4"));
                }
                Ok(())
            })
            .method("test_1", 2, test_ok)
            .method("test_2", 3, test_ok)
            .method("test_3", 4, test_ok)
            .method("test_4", 5, test_ok)
            .method("test_5", 6, test_ok),
    );

    let results = run_source(source);
    assert_eq!(
        results,
        vec![
            TestResult::error("TestLifecycle", RaisedError::msg("setup failed on 4")).with_sub_results(
                vec![
                    TestResult::pass("test_1"),
                    TestResult::pass("test_2"),
                    TestResult::pass("test_3"),
                ]
            )
        ]
    );
    assert_eq!(calls.get(), 4);
}

#[test]
fn test_lifecycle_error_does_not_affect_other_units() {
    let source = TestSource::new("mixed_test")
        .function("test_before", 1, |_| Ok(()))
        .class(
            TestClass::<(), ()>::new("TestBroken", 3)
                .setup_class(|_| Err(RaisedError::msg("cannot start")))
                .method("test_never_runs", 4, |_, _, t| t.fail("ran anyway", false)),
        )
        .function("test_after", 9, |_| Ok(()));

    let results = run_source(source);
    assert_eq!(
        results,
        vec![
            TestResult::pass("test_before"),
            TestResult::error("TestBroken", RaisedError::msg("cannot start")),
            TestResult::pass("test_after"),
        ]
    );

    assert_eq!(
        render(&results),
        "test_before PASS\nTestBroken ERROR\n    error: cannot start\ntest_after PASS\n"
    );
}

#[test]
fn test_error_in_body_is_isolated() {
    let source = TestSource::new("errors_test")
        .function("test_reads_missing_file", 1, |t| {
            t.fail("recorded before the error", false)?;
            std::fs::read_to_string("/definitely/not/here.txt")?;
            Ok(())
        })
        .function("test_sibling", 5, |_| Ok(()));

    let results = run_source(source);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].status(), Status::Error);
    assert!(results[0].messages().is_empty());
    assert!(results[0].raised_error().unwrap().kind.contains("io"));
    assert_eq!(results[1], TestResult::pass("test_sibling"));
}

#[test]
fn test_multiple_sources_summary() {
    let units = discover_all(vec![
        numbers_test(),
        TestSource::new("classes_test").class(
            TestClass::<(), ()>::new("TestFoo", 3)
                .method("test_passes", 4, |_, _, _| Ok(()))
                .method("test_fails", 7, |_, _, t| t.fail("oh no!", false)),
        ),
    ])
    .unwrap();
    let results = TestRunner::new().run_all(&units);

    assert_eq!(
        TestSummary::from_results(&results),
        TestSummary {
            total: 6,
            passed: 2,
            failed: 4,
            errored: 0,
        }
    );
}
