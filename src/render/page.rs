//! The single demo page: form, results, embedding preview, dataset panel

use crate::core::{QueryInput, SearchError, SearchMode, MAX_RESULT_LIMIT, MIN_RESULT_LIMIT};
use crate::pipeline::SearchOutcome;
use crate::render::escape_html;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; display: flex; }
aside { min-width: 400px; max-width: 800px; background: #f0f2f6; padding: 1rem; overflow: auto; height: 100vh; box-sizing: border-box; }
main { flex: 1; padding: 1rem 2rem; }
h1 { color: #FF9633; }
.subtitle, .label { color: grey; font-size: 20px; }
details { background: #f9f9f7; margin: 1rem 0; padding: 0.5rem; }
summary { background: black; color: white; padding: 0.25rem 0.5rem; cursor: pointer; }
form label { display: block; margin-top: 0.75rem; }
form input[type=text] { width: 100%; padding: 0.4rem; }
.error { color: #b00020; border: 1px solid #b00020; padding: 0.5rem; }
table.results { border-collapse: collapse; }
table.results th, table.results td { border: 1px solid #ddd; padding: 0.4rem; text-align: left; }
pre { white-space: pre-wrap; word-break: break-all; }
"#;

pub struct PageView<'a> {
    pub input: &'a QueryInput,
    pub outcome: Option<&'a SearchOutcome>,
    pub error: Option<&'a SearchError>,
    pub dataset_json: &'a str,
    pub dimension: usize,
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Cheese Query Engine</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<aside>\n<h2>Sample JSON dataset</h2>\n<pre id=\"dataset\">");
    html.push_str(&escape_html(view.dataset_json));
    html.push_str("</pre>\n</aside>\n");

    html.push_str("<main>\n<h1>Vector search: Cheese Query Engine</h1>\n");
    html.push_str(
        "<p class=\"subtitle\">Demo cheese search is based on the sample dataset shown in the side window.</p>\n",
    );
    html.push_str(&format!(
        "<details><summary>More info</summary>\n<p>The dataset is stored with each cheese \
         embedded by a sentence-transformer into a {}-dimension dense vector for semantic \
         search.</p>\n<ol><li>Search the vector database for cheese matches by embedding the \
         name and running a similarity search;</li><li>Refine the search with a keyword match \
         on the description field;</li><li>Choose the number of results.</li></ol>\n</details>\n",
        view.dimension
    ));

    push_form(&mut html, view.input);
    html.push_str("<hr>\n");

    if let Some(outcome) = view.outcome {
        push_embedding(&mut html, view.input, outcome);
    }

    html.push_str("<p class=\"label\">Results:</p>\n<section id=\"results\">");
    if let Some(error) = view.error {
        html.push_str(&format!(
            "<div class=\"error\">{}</div>",
            escape_html(&error.to_string())
        ));
    } else if let Some(outcome) = view.outcome {
        let mode = match outcome.mode {
            SearchMode::VectorKeyword => "vector + keyword",
            SearchMode::VectorOnly => "vector only",
        };
        html.push_str(&format!(
            "<p class=\"mode\">{} search, {} result(s) in {} ms</p>\n",
            mode,
            outcome.table.len(),
            outcome.elapsed_ms
        ));
        html.push_str(&outcome.table.to_html());
    }
    html.push_str("</section>\n</main>\n</body>\n</html>\n");

    html
}

fn push_form(html: &mut String, input: &QueryInput) {
    let name = input.name_text.as_deref().unwrap_or("");
    let description = input.description_text.as_deref().unwrap_or("");

    html.push_str("<form method=\"get\" action=\"/\">\n");
    html.push_str(&format!(
        "<label>Enter cheese name or type (vector search)\
         <input type=\"text\" name=\"name\" value=\"{}\"></label>\n",
        escape_html(name)
    ));
    html.push_str(&format!(
        "<label>Refine by description keyword\
         <input type=\"text\" name=\"description\" value=\"{}\"></label>\n",
        escape_html(description)
    ));
    html.push_str(&format!(
        "<label>Response range <output id=\"limit-value\">{limit}</output>\
         <input type=\"range\" name=\"limit\" min=\"{min}\" max=\"{max}\" value=\"{limit}\" \
         oninput=\"document.getElementById('limit-value').value = this.value\"></label>\n",
        min = MIN_RESULT_LIMIT,
        max = MAX_RESULT_LIMIT,
        limit = input.result_limit.clamp(MIN_RESULT_LIMIT, MAX_RESULT_LIMIT),
    ));
    html.push_str("<button type=\"submit\">Search</button>\n</form>\n");
}

fn push_embedding(html: &mut String, input: &QueryInput, outcome: &SearchOutcome) {
    let values: Vec<String> = outcome.embedding.iter().map(|v| v.to_string()).collect();
    html.push_str(&format!(
        "<details id=\"embedding\"><summary>Vector embedding ({} dimension vector)</summary>\n\
         <p>{}</p>\n<pre>[{}]</pre>\n</details>\n<hr>\n",
        outcome.embedding.len(),
        escape_html(input.name().unwrap_or("")),
        values.join(", ")
    ));
}
