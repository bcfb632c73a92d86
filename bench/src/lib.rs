/// Sample program shared by the benchmarks.
pub static INPUT: &str = include_str!("../../programs/pwr2.txt");
