//! Instruction template that turns a free-form character description into a
//! request for a cartoon ID photo.

const ID_PHOTO_TEMPLATE: &str = r#"You are an expert anime and cartoon illustrator. Your task is to create a high-quality, professional-style ID photo based on the user's character description.

**Core Instructions:**
1.  **Format:** Generate a head-and-shoulders bust shot.
2.  **Pose:** The character must be facing forward, looking directly at the camera.
3.  **Expression:** The character should have a neutral, closed-mouth expression suitable for an ID photo.
4.  **Background:** The background must be a solid, uniform, light color (e.g., #FFFFFF white or #F0F0F0 light grey).
5.  **Quality:** The image must be high-resolution, with clean lines and professional coloring. It should look like an official ID photo from the character's universe.
6.  **Art Style:** Strictly adhere to the art style mentioned in the user's prompt. If the user says "in the style of Naruto," the final image must look like it was drawn by Masashi Kishimoto. Do not add any text, watermarks, or borders.

**User's Request:**
"{user_prompt}"
"#;

pub fn id_photo_prompt(description: &str) -> String {
    ID_PHOTO_TEMPLATE.replace("{user_prompt}", description.trim())
}
