use std::fmt::Write;

use shared::escape_html;

use crate::models::Location;

/// Renders the photo detail panel for one location.
pub fn render_photo_detail(location: &Location) -> String {
    let mut html = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        html,
        r#"<div class="detail-header">
    <div class="detail-title">{name}</div>
    <button class="close-btn" onclick="closePhotoDetail()">×</button>
</div>
<div class="location-description">{description} (Day {day})</div>"#,
        name = escape_html(&location.name),
        description = escape_html(&location.description),
        day = location.day,
    );

    for photo in &location.photos {
        let _ = write!(
            html,
            r#"
<div class="photo-item">
    <img src="{src}" alt="{caption}">
    <div class="photo-caption">{caption}</div>
</div>"#,
            src = escape_html(photo.full_or_thumbnail()),
            caption = escape_html(&photo.caption),
        );
    }

    html
}
