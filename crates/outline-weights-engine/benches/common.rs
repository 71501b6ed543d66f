// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_outline(sections: usize, depth: usize) -> String {
    let mut content = String::new();
    for section in 0..sections {
        content.push_str(&format!("* Section {}\n\n", section));
        content.push_str(&generate_nested(depth, 2));
    }
    content
}

#[allow(dead_code)]
fn generate_nested(remaining_depth: usize, level: usize) -> String {
    if remaining_depth == 0 {
        return String::new();
    }

    let mut content = String::new();
    content.push_str(&format!("{} Level {}\n", "*".repeat(level), level));
    content.push_str("Some paragraph content with a couple of sentences. Enough to wrap.\n\n");
    for i in 0..3 {
        content.push_str(&format!("- item {}\n", i));
    }
    content.push('\n');
    if level % 3 == 0 {
        content.push_str("#+begin_src rust\nlet value = 42;\n#+end_src\n\n");
    }

    content.push_str(&generate_nested(remaining_depth - 1, level + 1));
    content
}
