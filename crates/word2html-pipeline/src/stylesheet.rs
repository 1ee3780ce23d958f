//! Document stylesheet
//!
//! The single `<style>` block embedded in every standalone document. Inline
//! styles written by the enricher take precedence; these rules provide the
//! typography and the layout adjustments that inline styles cannot express
//! (media queries, print rules).

/// CSS embedded in the `<head>` of the standalone document.
pub const DOCUMENT_CSS: &str = r#"
/* Typography */
body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Arial, sans-serif;
    font-size: 16px;
    line-height: 1.6;
    color: #333;
    max-width: 900px;
    margin: 0 auto;
    padding: 20px;
    background-color: #fff;
}

h1, h2, h3, h4, h5, h6 {
    line-height: 1.3;
    margin-top: 1.5em;
    margin-bottom: 0.5em;
    color: #222;
}

h1 { font-size: 2em; }
h2 { font-size: 1.6em; }
h3 { font-size: 1.35em; }
h4 { font-size: 1.15em; }
h5 { font-size: 1em; }
h6 { font-size: 0.9em; color: #555; }

p {
    margin: 0 0 1em 0;
}

a {
    color: #0563c1;
    text-decoration: underline;
}

/* Tables */
table.docx-table {
    border-collapse: collapse;
    width: 100%;
    margin: 1em 0;
}

table.docx-table th,
table.docx-table td {
    border: 1px solid #ddd;
    padding: 8px;
    vertical-align: top;
}

table.docx-table th {
    background-color: #f2f2f2;
    font-weight: bold;
    text-align: left;
}

table.docx-table td p,
table.docx-table th p {
    margin: 0;
}

/* Lists */
ul, ol {
    margin-top: 0.5em;
    margin-bottom: 0.5em;
    padding-left: 2em;
}

li {
    margin-bottom: 0.25em;
}

li > ul, li > ol {
    margin-top: 0.25em;
    margin-bottom: 0.25em;
}

/* Images */
img {
    max-width: 100%;
    height: auto;
    display: block;
    margin: 10px auto;
}

/* Blockquotes */
blockquote {
    margin: 1em 2em;
    padding: 0.5em 1em;
    border-left: 4px solid #ccc;
    color: #555;
    font-style: italic;
}

blockquote.intense {
    border-left-color: #4472c4;
    background-color: #f0f4fa;
    color: #1f3864;
    font-weight: bold;
}

/* Small screens */
@media (max-width: 768px) {
    body {
        padding: 10px;
        font-size: 15px;
    }

    table.docx-table {
        display: block;
        overflow-x: auto;
    }

    blockquote {
        margin: 1em 0.5em;
    }
}

/* Print */
@media print {
    body {
        max-width: none;
        padding: 0;
        color: #000;
    }

    a {
        color: #000;
    }

    table.docx-table tr,
    img,
    blockquote {
        page-break-inside: avoid;
    }

    h1, h2, h3, h4, h5, h6 {
        page-break-after: avoid;
    }
}
"#;
