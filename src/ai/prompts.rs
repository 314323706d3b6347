//! Prompt templates for the metadata generator
//!
//! Fixed templates; the model's free-text answers are parsed by the
//! generator's fallback pipeline, so prompts push hard for single-line,
//! label-only output.

/// Vision prompt asking for an image description
pub const IMAGE_DESCRIPTION_PROMPT: &str = "Please provide a detailed description of this image, \
focusing on the main subject and any important details.";

/// Ask the text model to summarize document content
pub fn build_summary_prompt(text: &str) -> String {
    format!(
        r#"Provide a concise and accurate summary of the following text, focusing on the main ideas and key details.
Limit your summary to a maximum of 150 words.

Text: {text}

Summary:"#
    )
}

/// Filename suggestion from an image description
pub fn build_image_filename_prompt(description: &str) -> String {
    format!(
        r#"Based on the description below, generate a specific and descriptive filename (2-4 words) for the image.
Do not include any data type words like 'image', 'jpg', 'png', etc. Use only letters and connect words with underscores.
Avoid using any special characters, symbols, markdown, or code formatting.

Description: {description}

Example:
Description: A photo of a sunset over the mountains.
Filename: sunset_over_mountains

Now generate the filename.

Filename:"#
    )
}

/// Filename suggestion from a document summary
pub fn build_text_filename_prompt(summary: &str) -> String {
    format!(
        r#"Based on the summary below, generate a specific and descriptive filename (2-4 words) that captures the essence of the document.
Do not include any data type words like 'text', 'document', 'pdf', etc. Use only letters and connect words with underscores. Avoid generic terms like 'describes'.

Summary: {summary}

Examples:
1. Summary: A research paper on the fundamentals of string theory.
   Filename: fundamentals_of_string_theory

2. Summary: An article discussing the effects of climate change on polar bears.
   Filename: climate_change_polar_bears

Now generate the filename.

Filename:"#
    )
}

/// Category (folder name) from an image description
pub fn build_image_category_prompt(description: &str) -> String {
    format!(
        r#"Based on the description below, generate a general category or theme (1-2 words) that best represents the main subject of this image.
This will be used as the folder name. Do not include specific details, words from the filename, any generic terms like 'untitled' or 'unknown', or any special characters, symbols, numbers, markdown, or code formatting.

Description: {description}

Examples:
1. Description: A photo of a sunset over the mountains.
   Category: landscapes

2. Description: An image of a smartphone displaying a storage app with various icons and information.
   Category: technology

3. Description: A close-up of a blooming red rose with dew drops.
   Category: nature

Now generate the category.

Category:"#
    )
}

/// Category (folder name) from a document summary
pub fn build_text_category_prompt(summary: &str) -> String {
    format!(
        r#"Based on the summary below, generate a general category or theme (1-2 words) that best represents the main subject of this document.
This will be used as the folder name. Do not include specific details, words from the filename, or any generic terms like 'untitled' or 'unknown'.

Summary: {summary}

Examples:
1. Summary: A research paper on the fundamentals of string theory.
   Category: physics

2. Summary: An article discussing the effects of climate change on polar bears.
   Category: environment

Now generate the category.

Category:"#
    )
}

/// Korean folder-name prompt for a group of similar filenames
///
/// The answer is judged by the label normalizer, which requires a meaningful
/// Hangul label and bans generic words.
pub fn build_group_category_prompt(filenames: &[String]) -> String {
    let listing = filenames
        .iter()
        .map(|name| format!("- {name}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"다음은 유사한 파일 이름들의 목록입니다:
{listing}

이 파일들의 공통 주제를 대표하는 **짧고 명확한 한국어 폴더명**을 한 줄로 출력하세요.

조건:
- 반드시 **의미 있는 한국어 명사**여야 하며, 최대 6글자 이내로 요약하세요.
- 설명하지 마세요. 예시는 금지.
- "기타", "모름", "출력" 같은 일반 단어는 사용하지 마세요.
- 출력은 오직 **한 줄**, 폴더명만!
"#
    )
}
