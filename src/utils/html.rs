/// Sanitizes user-submitted text that clients may render as HTML.
///
/// Whitelist-based (ammonia): harmless formatting tags survive, `<script>`,
/// `<iframe>` and event-handler attributes are dropped. Plain text and
/// markdown pass through unchanged apart from entity escaping of stray `<`.
pub fn sanitize_user_html(input: &str) -> String {
    ammonia::clean(input)
}
