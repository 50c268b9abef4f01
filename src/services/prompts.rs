//! Fixed prompt templates for the suggestion pipeline.
//!
//! The few-shot examples are part of the service's observable behavior:
//! the generator is expected to answer with a single line in the shape the
//! examples establish, so the template text is kept stable.

const PROMPT_LOCATION: &str = r#"
Your goal is to extract information from the user's input that matches the form described below. Extract an Output with <location> for each Input.

<location>: Generate the location in the world of the following input. Only respond with the city and country.

Input:
Ruriko visits robot versions of her former bandmates, who are kept in a sex hotel. Through talking with them, she revisits the day all of them died, leaving her the sole survivor.
Output:
Tokyo, Japan

Input:
After a disaster wipes out most of the food supply, a young woman struggles to find hope and love in her new basecamp.
Output:
Kraków, Poland

Input:
A TV critic begins to have trouble telling the difference between her own, real life, and the lives of the characters on television.
Output:
London, United Kingdom

Input:
{story}
Output:
"#;

const PROMPT_AUDIENCE: &str = r#"
Your goal is to extract information from the user's input that matches the form described below. Extract an Output with <audience> for each Input.

<audience>: Extract the target audience of the following input. Only respond with the group of people that could be interested in this input

Input:
Ruriko visits robot versions of her former bandmates, who are kept in a sex hotel. Through talking with them, she revisits the day all of them died, leaving her the sole survivor.
Output:
Fans of science fiction

Input:
After a disaster wipes out most of the food supply, a young woman struggles to find hope and love in her new basecamp.
Output:
Young adults, people interested in stories of resilience and hope

Input:
A TV critic begins to have trouble telling the difference between her own, real life, and the lives of the characters on television.
Output:
TV viewers, people interested in media and pop culture

Input:
{story}
Output:
"#;

const PROMPT_TOPIC: &str = r#"
Your goal is to extract information from the user's input that matches the form described below. Extract an Output with <topic> for each Input.

<topic>: Generate the the main topics of the following input. Only repond with two

Input:
Ruriko visits robot versions of her former bandmates, who are kept in a sex hotel. Through talking with them, she revisits the day all of them died, leaving her the sole survivor.
Output:
Death and Technology

Input:
After a disaster wipes out most of the food supply, a young woman struggles to find hope and love in her new basecamp.
Output:
Survival and Romance

Input:
A TV critic begins to have trouble telling the difference between her own, real life, and the lives of the characters on television.
Output:
Television and Reality

Input:
{story}
Output:
"#;

const PROMPT_EXPLANATION: &str = r#"
You are writing a one-sentence recommendation for why a reader might like a story. Be consice and don't repeat terms.

Input:
- The story takes place in New York City, USA.
- The audience for the story is fans of crime and suspense
- The story is about love and nature

Output:
This thrilling story about love and nature set in the heart of New York City will appeal to fans of crime and suspense.

Input:
- The story takes place in Tokyo, Japan
- The audience for the story is people interested in stories about science-fiction
- The story is about robots and death

Output:
This thrilling tale about robots and death set in the bustling city of Tokyo will appeal to readers interested in science-fiction.

Input:
- The story takes place in Westport, Ireland.
- The audience for the story is children, people interested in magical realism
- The story is about mystery and wonder.

Why might the reader like this book?

Output:
This enchanting story of mystery and wonder in Westport, Ireland will appeal to children and those interested in magical realism.

Input:
- The story takes place in {location}
- The audience for the story is {audience}
- The story is about {topic}

Output:
"#;

pub fn location(story: &str) -> String {
    PROMPT_LOCATION.replace("{story}", story)
}

pub fn audience(story: &str) -> String {
    PROMPT_AUDIENCE.replace("{story}", story)
}

pub fn topic(story: &str) -> String {
    PROMPT_TOPIC.replace("{story}", story)
}

pub fn explanation(location: &str, audience: &str, topic: &str) -> String {
    PROMPT_EXPLANATION
        .replace("{location}", location)
        .replace("{audience}", audience)
        .replace("{topic}", topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORY: &str = "A lighthouse keeper finds a message in a bottle from herself.";

    #[test]
    fn story_prompts_substitute_the_placeholder() {
        for filled in [location(STORY), audience(STORY), topic(STORY)] {
            assert!(filled.contains(STORY));
            assert!(!filled.contains("{story}"));
        }
    }

    #[test]
    fn explanation_prompt_fills_all_three_placeholders() {
        let filled = explanation("Lisbon, Portugal", "fans of quiet mysteries", "memory and the sea");

        assert!(filled.contains("takes place in Lisbon, Portugal"));
        assert!(filled.contains("audience for the story is fans of quiet mysteries"));
        assert!(filled.contains("story is about memory and the sea"));
        assert!(!filled.contains('{'));
    }
}
