//! Shared presentation assets wrapped around every generated page

use crate::domain::html_escape;

/// Attribution shown at the bottom of every page
const FOOTER: &str = r#"<footer class="site-footer">
  <p>Generated with mdjournal</p>
</footer>"#;

/// Copies the text of the block following a `.code-header`, then shows a
/// checkmark on the button for two seconds.
const COPY_SCRIPT: &str = r#"<script>
function copyCode(button) {
  const block = button.parentElement.nextElementSibling;
  if (!block) {
    return;
  }
  const original = button.textContent;
  navigator.clipboard.writeText(block.textContent).then(function () {
    button.textContent = '✔';
    setTimeout(function () {
      button.textContent = original;
    }, 2000);
  });
}
</script>"#;

/// Loads MathJax asynchronously so it never blocks rendering
const MATH_SCRIPT: &str = r#"<script>
window.MathJax = {
  tex: { inlineMath: [['$', '$'], ['\\(', '\\)']] }
};
(function () {
  var script = document.createElement('script');
  script.src = 'https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js';
  script.async = true;
  document.head.appendChild(script);
})();
</script>"#;

/// Wraps transpiled bodies with theme CSS, footer and page scripts
pub struct PageDecorator;

impl PageDecorator {
    /// Decorate a page body.
    ///
    /// The order is fixed: style, body, footer, copy script, math loader.
    /// Content has to precede the scripts so the copy buttons can reach
    /// their code blocks through `nextElementSibling`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdjournal::render::PageDecorator;
    ///
    /// let page = PageDecorator::decorate("<p>Hi</p>", "");
    /// assert!(page.starts_with("<style></style>"));
    /// assert!(page.contains("copyCode"));
    /// ```
    pub fn decorate(html_body: &str, css: &str) -> String {
        let mut output = String::with_capacity(
            html_body.len() + css.len() + FOOTER.len() + COPY_SCRIPT.len() + MATH_SCRIPT.len() + 32,
        );
        output.push_str("<style>");
        output.push_str(css);
        output.push_str("</style>\n");
        output.push_str(html_body);
        if !html_body.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(FOOTER);
        output.push('\n');
        output.push_str(COPY_SCRIPT);
        output.push('\n');
        output.push_str(MATH_SCRIPT);
        output.push('\n');
        output
    }

    /// Complete HTML document around a decorated body
    pub fn document(title: &str, decorated: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{}</title>
</head>
<body>
{}</body>
</html>
"#,
            html_escape(title),
            decorated
        )
    }
}
