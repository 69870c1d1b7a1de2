//! 内置的示例测试源，`rutest` 二进制默认运行它们

use std::io;

use rutest::{RaisedError, TestClass, TestContext, TestOutcome, TestSource};

fn add(x: i64, y: i64) -> i64 {
    x + y
}

fn sub(x: i64, y: i64) -> i64 {
    x - y
}

pub fn sources() -> Vec<TestSource> {
    vec![numbers_test(), failures_test(), classes_test(), lifecycle_test()]
}

fn test_add(t: &mut TestContext) -> TestOutcome {
    let (x, y) = (2, 3);
    let expected = 5;
    let actual = add(x, y);
    if expected != actual {
        t.fail(&format!("expected {} + {} to be {}, got {}", x, y, expected, actual), false)?;
    }
    Ok(())
}

fn test_sub(t: &mut TestContext) -> TestOutcome {
    let actual = sub(2, 3);
    t.assert_equal(actual, 5, "disappointing", false)
}

fn numbers_test() -> TestSource {
    TestSource::new("numbers_test")
        .helper("add", line!())
        .function("test_add", line!(), test_add)
        .function("test_sub", line!(), test_sub)
}

fn failures_test() -> TestSource {
    TestSource::new("failures_test")
        .function("test_multiple_failures", line!(), |t| {
            t.fail("failure message", false)?;
            t.fail("", false)?;
            t.fail("multiple failures are allowed in the same test", false)
        })
        .function("test_require_failure", line!(), |t| {
            t.fail("requiring a failure stops the test", true)?;
            t.fail("won't reach here", false)
        })
        .function("test_unexpected_error", line!(), |_| {
            std::fs::read_to_string("/definitely/not/here.txt")?;
            Ok(())
        })
}

#[derive(Default)]
struct Counter {
    count: u32,
}

fn classes_test() -> TestSource {
    TestSource::new("classes_test")
        .class(
            TestClass::<(), ()>::new("TestAdd", line!())
                .method("test_adding_two_and_three_returns_five", line!(), |_, _, t| {
                    t.assert_equal(5, add(2, 3), "this is most disappointing", false)
                })
                .method("test_adding_three_and_three_returns_seven", line!(), |_, _, t| {
                    t.assert_equal(7, add(3, 3), "this is most disappointing", false)
                }),
        )
        .class(
            TestClass::<(), Counter>::new("TestFreshInstances", line!())
                .setup(|_, counter| {
                    counter.count += 1;
                    Ok(())
                })
                .method("test_first", line!(), |_, counter, t| {
                    t.assert_equal(1, counter.count, "", false)
                })
                .method("test_second", line!(), |_, counter, t| {
                    t.assert_equal(1, counter.count, "state leaked between methods", false)
                }),
        )
}

#[derive(Default)]
struct Connection {
    open: bool,
}

fn lifecycle_test() -> TestSource {
    TestSource::new("lifecycle_test").class(
        TestClass::<Connection, ()>::new("TestBrokenTeardownClass", line!())
            .setup_class(|conn| {
                conn.open = true;
                Ok(())
            })
            .method("test_connection_is_open", line!(), |conn, _, t| {
                t.assert_true(conn.open, "", false)
            })
            .teardown_class(|_| {
                Err(RaisedError::from(io::Error::other("connection refused to close")))
            }),
    )
}
