use serde_json::{json, Value};

fn exercise_item_schema(description_for_type: &str, options_description: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "type": { "type": "STRING", "description": description_for_type },
            "question": { "type": "STRING", "description": "The question or sentence with a blank." },
            "options": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": options_description
            },
            "answer": { "type": "STRING", "description": "The correct answer for the exercise." }
        }
    })
}

/// Object with summary, level, exercises, studyGuide and practiceTask.
pub fn learning_material_schema() -> Value {
    let mut exercise = exercise_item_schema(
        "Type of exercise (e.g., \"Fill-in-the-blank\", \"Multiple-choice\").",
        "Options for multiple-choice questions (can be empty).",
    );
    exercise["required"] = json!(["type", "question", "answer"]);

    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING", "description": "A concise overview of what was found in the notes." },
            "level": { "type": "STRING", "description": "The approximate CEFR level (e.g., A1, A2, B1, etc.)." },
            "exercises": {
                "type": "ARRAY",
                "description": "A list of practice exercises.",
                "items": exercise
            },
            "studyGuide": {
                "type": "OBJECT",
                "description": "A short explanation of the rules or vocabulary.",
                "properties": {
                    "title": { "type": "STRING", "description": "The title of the study guide topic." },
                    "points": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "A list of key points or rules with examples."
                    }
                },
                "required": ["title", "points"]
            },
            "practiceTask": {
                "type": "OBJECT",
                "description": "An open-ended activity for the learner.",
                "properties": {
                    "title": { "type": "STRING", "description": "The title of the practice task." },
                    "description": { "type": "STRING", "description": "Instructions for the practice task." }
                },
                "required": ["title", "description"]
            }
        },
        "required": ["summary", "level", "exercises", "studyGuide", "practiceTask"]
    })
}

/// Array of multiple-choice questions.
pub fn quiz_schema() -> Value {
    let mut item = exercise_item_schema(
        "Should always be \"Multiple-choice\".",
        "An array of 4 possible answers.",
    );
    item["properties"]["question"]["description"] = json!("The quiz question.");
    item["properties"]["answer"]["description"] =
        json!("The correct answer, which must be one of the options.");
    item["required"] = json!(["type", "question", "options", "answer"]);

    json!({
        "type": "ARRAY",
        "description": "A list of multiple-choice quiz questions.",
        "items": item
    })
}
