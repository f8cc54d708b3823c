// src/domain/messages.rs
//
// User-facing strings. The platform's audience reads Uzbek, so every message
// shown in the page or printed by the CLI lives here.

pub const CENTER_NOT_FOUND: &str = "Markaz ma'lumotlari topilmadi";
pub const CENTER_LOAD_FAILED: &str = "Markaz ma'lumotlarini yuklashda xatolik yuz berdi";

pub const EMPTY_TEXT: &str = "Izoh matni bo'sh bo'lmasligi kerak.";
pub const LOGIN_TO_CREATE: &str = "Izoh qo'shish uchun tizimga kiring.";
pub const LOGIN_TO_EDIT: &str = "Izohni tahrirlash uchun tizimga kiring.";
pub const LOGIN_TO_DELETE: &str = "Izohni o'chirish uchun tizimga kiring.";
pub const IDENTITY_MISSING: &str =
    "Foydalanuvchi ma'lumotlari topilmadi. Iltimos, qaytadan kiring.";
pub const COMMENT_NOT_FOUND: &str = "O'chirmoqchi bo'lgan izoh topilmadi.";
pub const EDIT_TARGET_NOT_FOUND: &str = "Tahrirlamoqchi bo'lgan izoh topilmadi.";
pub const NOT_OWNER_DELETE: &str = "Siz ushbu izohni o'chirish huquqiga ega emassiz.";
pub const NOT_OWNER_EDIT: &str = "Siz ushbu izohni tahrirlash huquqiga ega emassiz.";
pub const NOT_EDITING: &str = "Tahrirlash uchun izoh tanlanmagan.";

pub const SESSION_EXPIRED: &str = "Avtorizatsiya muddati tugagan. Iltimos, qaytadan kiring.";
pub const CONNECTIVITY: &str =
    "Server bilan bog'lanishda xatolik. Internet ulanishingizni tekshiring.";

pub const LOAD_FAILED: &str = "Izohlarni yuklashda xatolik yuz berdi.";
pub const CREATE_FAILED: &str =
    "Izoh qo'shishda xatolik yuz berdi. Iltimos, qaytadan urinib ko'ring.";
pub const EDIT_FAILED: &str = "Izohni tahrirlashda xatolik yuz berdi";
pub const DELETE_FAILED: &str = "Izohni o'chirishda xatolik yuz berdi";

pub const CREATED_BUT_STALE: &str =
    "Izoh qo'shildi, lekin ma'lumotlarni yangilashda xatolik yuz berdi.";
pub const EDITED_BUT_STALE: &str =
    "Izoh tahrirlandi, lekin ma'lumotlarni yangilashda xatolik yuz berdi.";

// Page labels
pub const LOADING: &str = "Yuklanmoqda...";
pub const NO_IMAGE: &str = "Rasm mavjud emas";
pub const ADDRESS: &str = "Manzil";
pub const NO_ADDRESS: &str = "Manzil mavjud emas";
pub const PHONE: &str = "Telefon";
pub const NO_PHONE: &str = "Telefon raqam mavjud emas";
pub const DESCRIPTION: &str = "Tavsif";
pub const NO_DESCRIPTION: &str = "Tavsif mavjud emas";
pub const COURSES: &str = "Kurslar";
pub const NO_COURSES: &str = "Kurslar mavjud emas";
pub const PRICE: &str = "Narxi";
pub const SCHEDULE: &str = "Dars jadvali";
pub const NO_SCHEDULE: &str = "Dars jadvali mavjud emas";
pub const FACILITIES: &str = "Imkoniyatlar";
pub const NO_FACILITIES: &str = "Imkoniyatlar mavjud emas";
pub const COMMENTS: &str = "Izohlar";
pub const NO_COMMENTS: &str = "Hozircha izohlar mavjud emas";
pub const COMMENT_PLACEHOLDER: &str = "Izohingizni yozing...";
pub const ADD_COMMENT: &str = "Izoh qo'shish";
pub const SAVE: &str = "Saqlash";
pub const CANCEL: &str = "Bekor qilish";
pub const EDIT: &str = "Tahrirlash";
pub const DELETE: &str = "O'chirish";
pub const LOGIN_PROMPT: &str = "Izoh qoldirish uchun iltimos,";
pub const LOGIN_LINK: &str = "tizimga kiring";
pub const BACK: &str = "Orqaga qaytish";
