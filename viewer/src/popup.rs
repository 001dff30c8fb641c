use shared::{Location, escape_html};

pub fn route_popup(name: &str) -> String {
    format!("<b>{}</b>", escape_html(name))
}

/// Name, day and, when there is one, the first photo's thumbnail. The
/// thumbnail carries the location id for the hover handler.
pub fn location_popup(location: &Location) -> String {
    let mut html = String::from(r#"<div class="photo-popup">"#);
    html.push_str(&format!(
        r#"<div class="location-name">{}</div><div class="location-day">Day {}</div>"#,
        escape_html(&location.name),
        location.day
    ));
    if let Some(photo) = location.first_photo() {
        html.push_str(&format!(
            r#"<img src="{}" class="photo-thumbnail" data-location-id="{}">"#,
            escape_html(&photo.thumbnail),
            location.id
        ));
    }
    html.push_str("</div>");
    html
}
