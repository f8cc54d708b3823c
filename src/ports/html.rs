// src/ports/html.rs
use crate::application::{CommentPanelView, DetailState};
use crate::constants::DEFAULT_IMAGE_BASE_URL;
use crate::domain::{messages, Center, Comment, Section, SectionToggles, StarRow};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;
use tracing::instrument;

#[derive(Debug)]
pub struct HtmlPresenter {
    image_base_url: String,
}

impl Default for HtmlPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlPresenter {
    pub fn new() -> Self {
        Self::with_image_base(DEFAULT_IMAGE_BASE_URL)
    }

    pub fn with_image_base(image_base_url: impl Into<String>) -> Self {
        Self {
            image_base_url: image_base_url.into(),
        }
    }

    /// Image assets live beside the API by convention: `{image_base_url}/{image}`.
    pub fn image_url(&self, image: &str) -> String {
        format!(
            "{}/{}",
            self.image_base_url.trim_end_matches('/'),
            image.trim_start_matches('/')
        )
    }

    /// Full HTML document for the detail page.
    #[instrument(level = "debug", skip_all)]
    pub fn render(
        &self,
        state: &DetailState,
        sections: &SectionToggles,
        comments: Option<&CommentPanelView<'_>>,
    ) -> String {
        let (title, body) = match state {
            DetailState::Loading => (messages::LOADING.to_string(), spinner()),
            DetailState::Failed(error) => (
                error.to_string(),
                format!(
                    r#"<div class="error-banner" role="alert">{}</div>"#,
                    encode_text(&error.to_string())
                ),
            ),
            DetailState::Loaded(center) => (
                center.name.clone(),
                self.render_center(center, sections, comments),
            ),
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 960px;
            margin: 2rem auto;
            padding: 0 1rem;
            background-color: #f5f5f5;
        }}
        .card {{
            background: white;
            border-radius: 8px;
            padding: 2rem;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }}
        .center-image {{
            width: 100%;
            max-height: 380px;
            object-fit: cover;
            border-radius: 8px;
        }}
        .no-image {{
            height: 200px;
            display: flex;
            align-items: center;
            justify-content: center;
            background: #e9ecef;
            color: #666;
            border-radius: 8px;
        }}
        .section {{
            margin-top: 1rem;
            border-top: 1px solid #eee;
        }}
        .section-toggle {{
            width: 100%;
            display: flex;
            justify-content: space-between;
            background: none;
            border: none;
            padding: 0.75rem 0;
            font-size: 1.1em;
            cursor: pointer;
        }}
        .chevron.rotate-180 {{
            transform: rotate(180deg);
        }}
        .error-banner {{
            background: #fdecea;
            color: #b71c1c;
            padding: 1rem;
            border-radius: 4px;
        }}
        .spinner {{
            width: 48px;
            height: 48px;
            margin: 3rem auto;
            border: 4px solid #ddd;
            border-top-color: #2563eb;
            border-radius: 50%;
        }}
        .star {{
            color: #d1d5db;
            background: none;
            border: none;
            font-size: 1.2em;
        }}
        .star.filled {{
            color: #facc15;
        }}
        .comment {{
            padding: 1rem 0;
            border-bottom: 1px solid #eee;
        }}
        .comment-meta {{
            font-size: 0.9em;
            color: #666;
        }}
    </style>
</head>
<body>
{body}
</body>
</html>"#,
            title = encode_text(&title),
            body = body,
        )
    }

    fn render_center(
        &self,
        center: &Center,
        sections: &SectionToggles,
        comments: Option<&CommentPanelView<'_>>,
    ) -> String {
        let image = match center.image_ref() {
            Some(image) => format!(
                r#"<img class="center-image" src="{}" alt="{}">"#,
                encode_double_quoted_attribute(&self.image_url(image)),
                encode_double_quoted_attribute(&center.name)
            ),
            None => format!(r#"<div class="no-image">{}</div>"#, messages::NO_IMAGE),
        };

        let mut html = String::new();
        let _ = write!(
            html,
            r#"<div class="card">
    {image}
    <h1>{name}</h1>
    <div class="info">
        <div class="address"><h3>{address_label}</h3><p>{address}</p></div>
        <div class="phone"><h3>{phone_label}</h3><p>{phone}</p></div>
        <div class="description"><h3>{description_label}</h3><p>{description}</p></div>
    </div>
"#,
            image = image,
            name = encode_text(&center.name),
            address_label = messages::ADDRESS,
            address = encode_text(or_placeholder(&center.address, messages::NO_ADDRESS)),
            phone_label = messages::PHONE,
            phone = encode_text(or_placeholder(&center.phone, messages::NO_PHONE)),
            description_label = messages::DESCRIPTION,
            description =
                encode_text(or_placeholder(&center.description, messages::NO_DESCRIPTION)),
        );

        for section in Section::ALL {
            html.push_str(&self.render_section(center, section, sections.is_expanded(section)));
        }

        if let Some(view) = comments {
            let _ = write!(
                html,
                "    <div class=\"comments\">\n{}\n    </div>\n",
                self.render_comments(view)
            );
        }

        let _ = write!(
            html,
            "    <a class=\"back\" href=\"/\">&larr; {}</a>\n</div>",
            messages::BACK
        );
        html
    }

    fn render_section(&self, center: &Center, section: Section, expanded: bool) -> String {
        let header = format!(
            r#"    <div class="section" data-section="{key}">
        <button class="section-toggle" aria-expanded="{expanded}"><h3>{title}</h3><span class="chevron{rotate}">&#9662;</span></button>
"#,
            key = section.key(),
            expanded = expanded,
            title = section.title(),
            rotate = if expanded { " rotate-180" } else { "" },
        );
        if !expanded {
            return format!("{header}    </div>\n");
        }

        let content = match section {
            Section::Courses if center.courses.is_empty() => empty_note(messages::NO_COURSES),
            Section::Courses => center
                .courses
                .iter()
                .map(|course| {
                    format!(
                        r#"<div class="course"><h4>{}</h4><p>{}</p><p class="price">{}: {}</p></div>"#,
                        encode_text(&course.name),
                        encode_text(course.description.as_deref().unwrap_or_default()),
                        messages::PRICE,
                        encode_text(course.price.as_deref().unwrap_or_default()),
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Section::Schedule if center.schedule.is_empty() => empty_note(messages::NO_SCHEDULE),
            Section::Schedule => center
                .schedule
                .iter()
                .map(|entry| {
                    format!(
                        r#"<div class="schedule-entry"><h4>{}</h4><p>{} - {}</p></div>"#,
                        encode_text(&entry.course),
                        encode_text(&entry.day),
                        encode_text(&entry.time),
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Section::Facilities if center.facilities.is_empty() => {
                empty_note(messages::NO_FACILITIES)
            }
            Section::Facilities => center
                .facilities
                .iter()
                .map(|facility| {
                    format!(
                        r#"<div class="facility">&#10003; {}</div>"#,
                        encode_text(facility)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
        };

        format!("{header}        <div class=\"section-content\">\n{content}\n        </div>\n    </div>\n")
    }

    /// Comment panel: spinner, error banner, or form plus list.
    pub fn render_comments(&self, view: &CommentPanelView<'_>) -> String {
        if view.loading {
            return spinner();
        }
        if let Some(error) = view.error {
            return format!(
                r#"<div class="error-banner" role="alert">{}</div>"#,
                encode_text(error)
            );
        }

        let mut html = format!("<h3>{}</h3>\n", messages::COMMENTS);

        if view.authenticated {
            let _ = write!(
                html,
                r#"<form class="comment-form">
    <div class="stars">{stars}</div>
    <textarea rows="3" placeholder="{placeholder}" required>{text}</textarea>
    <button type="submit">{submit}</button>
</form>
"#,
                stars = self.render_stars(&StarRow::interactive(view.draft.rating)),
                placeholder = messages::COMMENT_PLACEHOLDER,
                text = encode_text(&view.draft.text),
                submit = messages::ADD_COMMENT,
            );
        } else {
            let _ = writeln!(
                html,
                r#"<p class="login-prompt">{} <a href="/login">{}</a></p>"#,
                messages::LOGIN_PROMPT,
                messages::LOGIN_LINK
            );
        }

        if view.comments.is_empty() {
            let _ = write!(html, "{}", empty_note(messages::NO_COMMENTS));
            return html;
        }

        for comment in view.comments {
            html.push_str(&self.render_comment(view, comment));
        }
        html
    }

    fn render_comment(&self, view: &CommentPanelView<'_>, comment: &Comment) -> String {
        if let Some(editing) = view.editing.filter(|e| e.comment_id == comment.id) {
            return format!(
                r#"<div class="comment editing" data-comment-id="{id}">
    <div class="stars">{stars}</div>
    <textarea rows="3" required>{text}</textarea>
    <button class="save">{save}</button>
    <button class="cancel">{cancel}</button>
</div>
"#,
                id = comment.id,
                stars = self.render_stars(&StarRow::interactive(editing.rating)),
                text = encode_text(&editing.text),
                save = messages::SAVE,
                cancel = messages::CANCEL,
            );
        }

        let actions = if view.can_modify(comment) {
            format!(
                r#"<div class="actions"><button class="edit">{}</button><button class="delete">{}</button></div>"#,
                messages::EDIT,
                messages::DELETE
            )
        } else {
            String::new()
        };

        format!(
            r#"<div class="comment" data-comment-id="{id}">
    <p class="author">{author}</p>
    <p class="comment-meta">{date}</p>
    <div class="stars">{stars}</div>
    {actions}
    <p class="comment-text">{text}</p>
</div>
"#,
            id = comment.id,
            author = encode_text(&comment.author_name()),
            date = encode_text(&comment.created_date().unwrap_or_default()),
            stars = self.render_stars(&StarRow::read_only(comment.star)),
            actions = actions,
            text = encode_text(&comment.text),
        )
    }

    /// Five star controls; interactive rows render as buttons.
    pub fn render_stars(&self, row: &StarRow) -> String {
        row.stars()
            .map(|star| {
                let class = if star.filled { "star filled" } else { "star" };
                if row.is_interactive() {
                    format!(
                        r#"<button type="button" class="{class}" data-star="{}">&#9733;</button>"#,
                        star.value
                    )
                } else {
                    format!(r#"<span class="{class}" data-star="{}">&#9733;</span>"#, star.value)
                }
            })
            .collect()
    }
}

fn spinner() -> String {
    format!(
        r#"<div class="spinner" aria-label="{}"></div>"#,
        messages::LOADING
    )
}

fn empty_note(text: &str) -> String {
    format!(r#"<p class="empty">{}</p>"#, text)
}

fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(placeholder)
}
