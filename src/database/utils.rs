use regex::Regex;

/// Collapse whitespace and rewrite `?` placeholders as numbered Postgres
/// parameters, so queries can be written in the terse positional style.
pub fn sql(query: &str) -> String {
    let collapsed = query.split_whitespace().collect::<Vec<&str>>().join(" ");
    let placeholder = Regex::new(r"\?").unwrap();

    let mut index = 0;
    placeholder
        .replace_all(&collapsed, |_: &regex::Captures| {
            index += 1;
            format!("${}", index)
        })
        .into_owned()
}
