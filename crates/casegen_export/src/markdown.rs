use casegen_domain::TestCase;

const HEADING: &str = "# Test Cases\n\n";

pub fn to_markdown(cases: &[TestCase]) -> String {
    let mut md = String::from(HEADING);
    for case in cases {
        md.push_str(&format!("## {}\n", case.title));
        md.push_str(&format!("**Preconditions:** {}\n\n", case.custom_preconds));
        md.push_str("**Steps:**\n");
        for step in &case.custom_steps_separated {
            md.push_str(&format!("- {} → *{}*\n", step.content, step.expected));
        }
        md.push_str("\n---\n");
    }
    md
}
