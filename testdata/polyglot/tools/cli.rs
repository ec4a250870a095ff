use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let total = checksum(&args);
    println!("{}", total);
}

fn checksum(args: &[String]) -> usize {
    args.iter().map(|a| a.len()).sum()
}
