//! Shared diff generators for benchmarks.

/// Generate a single-file unified diff with `line_count` hunk body lines,
/// cycling context, removed, and added lines so the parser exercises both
/// the cursor advance and the run-flush paths.
pub fn generate_unified_diff(line_count: usize) -> String {
    let mut out = String::from(
        "diff --git a/src/generated.rs b/src/generated.rs\n\
         index 1111111..2222222 100644\n\
         --- a/src/generated.rs\n\
         +++ b/src/generated.rs\n",
    );
    out.push_str(&format!("@@ -1,{} +1,{} @@\n", line_count, line_count));
    for i in 0..line_count {
        match i % 4 {
            0 => out.push_str(&format!(" let keep_{} = {};\n", i, i)),
            1 => out.push_str(&format!("-let old_{} = {};\n", i, i)),
            2 => out.push_str(&format!("+let new_{} = {};\n", i, i)),
            _ => out.push_str(&format!(" fn ctx_{}() {{}}\n", i)),
        }
    }
    out
}

/// Generate a diff spread over `file_count` file sections, one small
/// replacement hunk each.
pub fn generate_multi_file_diff(file_count: usize) -> String {
    let mut out = String::new();
    for i in 0..file_count {
        out.push_str(&format!(
            "diff --git a/src/file_{i}.rs b/src/file_{i}.rs\n\
             index 1111111..2222222 100644\n\
             --- a/src/file_{i}.rs\n\
             +++ b/src/file_{i}.rs\n\
             @@ -10,2 +10,2 @@\n\
             -    old_line_one();\n\
             -    old_line_two();\n\
             +    new_line_one();\n\
             +    new_line_two();\n"
        ));
    }
    out
}
