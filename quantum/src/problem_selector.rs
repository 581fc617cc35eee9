use std::{collections::VecDeque, panic};

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum SelectError {
    #[error("problem '{0}' not found in '{1}'")]
    NotFound(String, &'static str),
    #[error("could not read the problem number from input")]
    Input,
}

/// Gets the arguments from the command line and returns them as a VecDeque
pub fn get_args() -> VecDeque<String> {
    let mut args = std::env::args();
    // get rid of the first argument which is the program name
    args.next();

    args.collect()
}

/// Trait for selecting a problem to run
pub trait ProblemSelector {
    /// Name of the problem group.
    const NAME: &'static str;

    /// Vector of all available problems to choose
    fn list() -> Vec<&'static str>;

    /// Given a problem number or name, run the problem from the list of problems.
    /// Problem can be [`select(args)`] function of other [ProblemSelector]
    fn methods(number: &str, args: &mut VecDeque<String>) -> Result<(), SelectError>;

    /// Select a problem to run preselected or from user input
    /// The problem can be run with -1 to run all problems.
    fn select(args: &mut VecDeque<String>) -> Result<(), SelectError> {
        let arg = match args.pop_front() {
            Some(arg) => arg,
            None => {
                println!();
                println!("{}, provide a problem number:", Self::NAME);
                println!("-1: run all problems");

                for (i, problem) in Self::list().iter().enumerate() {
                    println!("{}: {}", i, problem);
                }

                let mut input = String::new();
                std::io::stdin()
                    .read_line(&mut input)
                    .map_err(|_| SelectError::Input)?;

                input.trim().to_string()
            }
        };

        if arg == "-1" {
            select_many(&Self::list(), Self::methods);
            return Ok(());
        }

        Self::methods(&arg, args)
    }
}

fn select_many(
    list: &[&'static str],
    methods: impl Fn(&str, &mut VecDeque<String>) -> Result<(), SelectError> + panic::RefUnwindSafe,
) {
    for (i, name) in list.iter().enumerate() {
        let result = panic::catch_unwind(|| methods(&i.to_string(), &mut VecDeque::new()));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(err)) => log::error!("problem {name} failed: {err}"),
            Err(_) => log::error!("problem {name} panicked"),
        }
    }
}

#[macro_export]
macro_rules! problems_impl {
    ($selector:ty, $name:expr, $($problem_type:expr => $method:expr),* $(,)?) => {
        impl $crate::problem_selector::ProblemSelector for $selector {
            const NAME: &'static str = $name;

            fn list() -> Vec<&'static str> {
                vec![$($problem_type),*]
            }

            #[allow(unused_assignments)]
            fn methods(
                number: &str,
                args: &mut std::collections::VecDeque<String>
            ) -> Result<(), $crate::problem_selector::SelectError> {
                let mut i: usize = 0;
                $(
                    if i.to_string() == number || $problem_type == number {
                        println!("Chose problem: {}", $problem_type);
                        $method(args);
                        return Ok(());
                    }

                    i += 1;
                )*

                Err($crate::problem_selector::SelectError::NotFound(number.to_string(), Self::NAME))
            }
        }
    };
}

#[cfg(test)]
mod test {
    use std::collections::VecDeque;

    use crate::problem_selector::{ProblemSelector, SelectError};

    struct TestProblems;

    problems_impl!(TestProblems, "test",
        "test1" => |_| println!("test1"),
        "test2" => |_| println!("test2"),
        "test3" => |args: &mut VecDeque<String>| { args.clear(); }
    );

    #[test]
    fn problem_selector() {
        assert_eq!(TestProblems::list(), vec!["test1", "test2", "test3"]);

        let mut args = VecDeque::from(vec!["2".to_string(), "leftover".to_string()]);
        assert_eq!(TestProblems::select(&mut args), Ok(()));
        assert!(args.is_empty());

        assert_eq!(TestProblems::methods("test1", &mut VecDeque::new()), Ok(()));
        assert_eq!(
            TestProblems::methods("7", &mut VecDeque::new()),
            Err(SelectError::NotFound("7".to_string(), "test"))
        );
    }
}
