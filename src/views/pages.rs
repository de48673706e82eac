use super::{APP_TITLE, Notice, document, escape_html, notice_html};
use crate::db::PatientRecord;

const ABOUT_TEXT: &str = "CerviHope supports pathologists screening liquid-based cytology \
slides for cervical cancer. Upload a microscopy image of cervical cells and the \
classification service assigns it to one of four diagnostic classes; every result \
is kept with the patient's name for later review.";

const COSTS_TEXT: &str = "Recurring costs include cloud storage, computing resources, \
model updates, and user support. Additional expenses cover training materials, \
continuous marketing to engage NGOs and government health officials, and outreach \
for broader adoption.";

pub fn login_page(notice: Option<&Notice>) -> String {
    let body = format!(
        r#"<main>
<h1>Login Page</h1>
{notice}
<form method="post" action="/login">
<p><label>Enter Username<br><input type="text" name="username" autocomplete="username"></label></p>
<p><label>Enter Password<br><input type="password" name="password" autocomplete="current-password"></label></p>
<p><button type="submit">Login</button></p>
</form>
</main>"#,
        notice = notice_html(notice),
    );
    document("Login", &body)
}

pub fn about_page(image_url: Option<&str>) -> String {
    let image = image_url
        .map(|url| {
            format!(
                r#"<img class="scan" src="{}" alt="Cervical cytology sample">"#,
                escape_html(url)
            )
        })
        .unwrap_or_default();
    format!("<h1>{APP_TITLE}</h1>\n<p>{ABOUT_TEXT}</p>\n{image}\n<p>{COSTS_TEXT}</p>")
}

pub fn analysis_page() -> String {
    r#"<h1>Image Analysis</h1>
<form method="post" action="/analysis" enctype="multipart/form-data">
<p><label>Patient name<br><input type="text" name="patient_name"></label></p>
<p><label>Microscopy image<br><input type="file" name="image" accept=".jpg,.jpeg,.png,image/jpeg,image/png"></label></p>
<p><button type="submit">Analyse</button></p>
</form>"#
        .to_string()
}

pub fn records_page(records: &[PatientRecord]) -> String {
    if records.is_empty() {
        return "<h1>Patient Records</h1>\n<p>No records yet.</p>".to_string();
    }

    let rows: String = records
        .iter()
        .enumerate()
        .map(|(idx, r)| {
            format!(
                r#"<tr>
<td>{n}</td><td>{name}</td><td>{file}</td><td>{label}</td><td>{conf:.2}%</td>
<td><details><summary>Show image</summary><img class="scan" src="/records/{idx}/image" alt="{file}"></details></td>
</tr>"#,
                n = idx + 1,
                name = escape_html(&r.patient_name),
                file = escape_html(&r.image_filename),
                label = escape_html(&r.prediction_label),
                conf = r.confidence_score * 100.0,
            )
        })
        .collect();

    format!(
        r#"<h1>Patient Records</h1>
<table>
<thead><tr><th>#</th><th>Patient</th><th>Image</th><th>Prediction</th><th>Confidence</th><th></th></tr></thead>
<tbody>
{rows}
</tbody>
</table>"#
    )
}

pub fn error_page(message: &str) -> String {
    let body = format!(
        r#"<main>
<h1>Something went wrong</h1>
<div class="notice error">{}</div>
<p><a href="/">Back</a></p>
</main>"#,
        escape_html(message)
    );
    document("Error", &body)
}
