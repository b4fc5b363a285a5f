/// Normalizes a user-supplied world name for validation and API calls.
pub fn sanitize_world(world: &str) -> String {
    world.to_lowercase().replace('\'', "")
}

pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();

            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new()
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
