const PROMPT_PREAMBLE: &str = "\
You are a creative designer assistant tasked with ensuring logos are compliant with the brand.
You are presented with an image of a logo and a list of requirements that can be used to check whether a logo is compliant with the brand.

# Analyze the logo and determine if it is compliant with the brand.
# You must ignore anything that is around the logo like text etc. You must focus on the logo only

## Important: the logo can be rotated, flipped or in any orientation, a flipped logo is still compliant if it meets the requirements

# You must consider the following questions when analyzing the logo:
";

const PROMPT_RESPONSE_CONTRACT: &str = r#"
# Answer each question with True or False
# If any answer is False, the logo is not compliant

## Your response should be a JSON object with exactly the following keys:
{"compliant": true, "explanation": "summary of the explanation", "questions": "answers to each question"}
"#;

// Keys named in the response contract must match ComplianceVerdict::parse.
pub fn build_compliance_prompt(questions: &[String]) -> String {
    let mut prompt = String::from(PROMPT_PREAMBLE);

    for (index, question) in questions.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", index + 1, question));
    }

    prompt.push_str(PROMPT_RESPONSE_CONTRACT);
    prompt
}
