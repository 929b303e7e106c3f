use pod_testing_core::TestMatch;
use std::path::Path;

/// `path` relative to `root` when it lies inside it
pub fn relative_to<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

pub fn print_test_match(test: &TestMatch, root: &Path) {
    println!("🧪 {} (scheme '{}')", test.target, test.scheme);
    println!(
        "   📦 {}: {}",
        test.container.kind,
        relative_to(&test.container.path, root).display()
    );
    if test.container.path != test.project {
        println!("   📁 project: {}", relative_to(&test.project, root).display());
    }
}
