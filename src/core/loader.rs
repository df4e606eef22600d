/// Splits an address list into trimmed, non-empty lines, keeping file order.
pub fn parse_address_list(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
