use problems::Problems;
use quantum::problem_selector::{ProblemSelector, get_args};

pub mod problems;

fn main() {
    env_logger::init();

    if let Err(err) = Problems::select(&mut get_args()) {
        log::error!("{err}");
    }
}
