//! Linux input event codes (`linux/input-event-codes.h`) used by the
//! translation tables.

// Event types
pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_REL: u16 = 0x02;
pub const EV_MSC: u16 = 0x04;
pub const EV_LED: u16 = 0x11;

// Relative axes
pub const REL_X: u16 = 0x00;
pub const REL_Y: u16 = 0x01;
pub const REL_HWHEEL: u16 = 0x06;
pub const REL_WHEEL: u16 = 0x08;
pub const REL_WHEEL_HI_RES: u16 = 0x0B;
pub const REL_HWHEEL_HI_RES: u16 = 0x0C;

// Key values
pub const KEY_RELEASED: i32 = 0;
pub const KEY_PRESSED: i32 = 1;
pub const KEY_REPEATED: i32 = 2;

// Keys and buttons
pub const KEY_ESC: u16 = 1;
pub const KEY_1: u16 = 2;
pub const KEY_2: u16 = 3;
pub const KEY_3: u16 = 4;
pub const KEY_4: u16 = 5;
pub const KEY_5: u16 = 6;
pub const KEY_6: u16 = 7;
pub const KEY_7: u16 = 8;
pub const KEY_8: u16 = 9;
pub const KEY_9: u16 = 10;
pub const KEY_0: u16 = 11;
pub const KEY_MINUS: u16 = 12;
pub const KEY_EQUAL: u16 = 13;
pub const KEY_BACKSPACE: u16 = 14;
pub const KEY_TAB: u16 = 15;
pub const KEY_Q: u16 = 16;
pub const KEY_W: u16 = 17;
pub const KEY_E: u16 = 18;
pub const KEY_R: u16 = 19;
pub const KEY_T: u16 = 20;
pub const KEY_Y: u16 = 21;
pub const KEY_U: u16 = 22;
pub const KEY_I: u16 = 23;
pub const KEY_O: u16 = 24;
pub const KEY_P: u16 = 25;
pub const KEY_LEFTBRACE: u16 = 26;
pub const KEY_RIGHTBRACE: u16 = 27;
pub const KEY_ENTER: u16 = 28;
pub const KEY_LEFTCTRL: u16 = 29;
pub const KEY_A: u16 = 30;
pub const KEY_S: u16 = 31;
pub const KEY_D: u16 = 32;
pub const KEY_F: u16 = 33;
pub const KEY_G: u16 = 34;
pub const KEY_H: u16 = 35;
pub const KEY_J: u16 = 36;
pub const KEY_K: u16 = 37;
pub const KEY_L: u16 = 38;
pub const KEY_SEMICOLON: u16 = 39;
pub const KEY_APOSTROPHE: u16 = 40;
pub const KEY_GRAVE: u16 = 41;
pub const KEY_LEFTSHIFT: u16 = 42;
pub const KEY_BACKSLASH: u16 = 43;
pub const KEY_Z: u16 = 44;
pub const KEY_X: u16 = 45;
pub const KEY_C: u16 = 46;
pub const KEY_V: u16 = 47;
pub const KEY_B: u16 = 48;
pub const KEY_N: u16 = 49;
pub const KEY_M: u16 = 50;
pub const KEY_COMMA: u16 = 51;
pub const KEY_DOT: u16 = 52;
pub const KEY_SLASH: u16 = 53;
pub const KEY_RIGHTSHIFT: u16 = 54;
pub const KEY_KPASTERISK: u16 = 55;
pub const KEY_LEFTALT: u16 = 56;
pub const KEY_SPACE: u16 = 57;
pub const KEY_CAPSLOCK: u16 = 58;
pub const KEY_F1: u16 = 59;
pub const KEY_F2: u16 = 60;
pub const KEY_F3: u16 = 61;
pub const KEY_F4: u16 = 62;
pub const KEY_F5: u16 = 63;
pub const KEY_F6: u16 = 64;
pub const KEY_F7: u16 = 65;
pub const KEY_F8: u16 = 66;
pub const KEY_F9: u16 = 67;
pub const KEY_F10: u16 = 68;
pub const KEY_NUMLOCK: u16 = 69;
pub const KEY_SCROLLLOCK: u16 = 70;
pub const KEY_KP7: u16 = 71;
pub const KEY_KP8: u16 = 72;
pub const KEY_KP9: u16 = 73;
pub const KEY_KPMINUS: u16 = 74;
pub const KEY_KP4: u16 = 75;
pub const KEY_KP5: u16 = 76;
pub const KEY_KP6: u16 = 77;
pub const KEY_KPPLUS: u16 = 78;
pub const KEY_KP1: u16 = 79;
pub const KEY_KP2: u16 = 80;
pub const KEY_KP3: u16 = 81;
pub const KEY_KP0: u16 = 82;
pub const KEY_KPDOT: u16 = 83;
pub const KEY_102ND: u16 = 86;
pub const KEY_F11: u16 = 87;
pub const KEY_F12: u16 = 88;
pub const KEY_KPENTER: u16 = 96;
pub const KEY_RIGHTCTRL: u16 = 97;
pub const KEY_KPSLASH: u16 = 98;
pub const KEY_SYSRQ: u16 = 99;
pub const KEY_RIGHTALT: u16 = 100;
pub const KEY_HOME: u16 = 102;
pub const KEY_UP: u16 = 103;
pub const KEY_PAGEUP: u16 = 104;
pub const KEY_LEFT: u16 = 105;
pub const KEY_RIGHT: u16 = 106;
pub const KEY_END: u16 = 107;
pub const KEY_DOWN: u16 = 108;
pub const KEY_PAGEDOWN: u16 = 109;
pub const KEY_INSERT: u16 = 110;
pub const KEY_DELETE: u16 = 111;
pub const KEY_MUTE: u16 = 113;
pub const KEY_VOLUMEDOWN: u16 = 114;
pub const KEY_VOLUMEUP: u16 = 115;
pub const KEY_POWER: u16 = 116;
pub const KEY_KPEQUAL: u16 = 117;
pub const KEY_PAUSE: u16 = 119;
pub const KEY_SCALE: u16 = 120;
pub const KEY_KPCOMMA: u16 = 121;
pub const KEY_LEFTMETA: u16 = 125;
pub const KEY_RIGHTMETA: u16 = 126;
pub const KEY_COMPOSE: u16 = 127;
pub const KEY_STOP: u16 = 128;
pub const KEY_PROPS: u16 = 130;
pub const KEY_UNDO: u16 = 131;
pub const KEY_COPY: u16 = 133;
pub const KEY_OPEN: u16 = 134;
pub const KEY_PASTE: u16 = 135;
pub const KEY_FIND: u16 = 136;
pub const KEY_CUT: u16 = 137;
pub const KEY_HELP: u16 = 138;
pub const KEY_MENU: u16 = 139;
pub const KEY_CALC: u16 = 140;
pub const KEY_SLEEP: u16 = 142;
pub const KEY_FILE: u16 = 144;
pub const KEY_WWW: u16 = 150;
pub const KEY_COFFEE: u16 = 152;
pub const KEY_MAIL: u16 = 155;
pub const KEY_BOOKMARKS: u16 = 156;
pub const KEY_BACK: u16 = 158;
pub const KEY_FORWARD: u16 = 159;
pub const KEY_EJECTCD: u16 = 161;
pub const KEY_NEXTSONG: u16 = 163;
pub const KEY_PLAYPAUSE: u16 = 164;
pub const KEY_PREVIOUSSONG: u16 = 165;
pub const KEY_STOPCD: u16 = 166;
pub const KEY_RECORD: u16 = 167;
pub const KEY_REWIND: u16 = 168;
pub const KEY_PHONE: u16 = 169;
pub const KEY_CONFIG: u16 = 171;
pub const KEY_HOMEPAGE: u16 = 172;
pub const KEY_REFRESH: u16 = 173;
pub const KEY_EXIT: u16 = 174;
pub const KEY_EDIT: u16 = 176;
pub const KEY_SCROLLUP: u16 = 177;
pub const KEY_SCROLLDOWN: u16 = 178;
pub const KEY_NEW: u16 = 181;
pub const KEY_REDO: u16 = 182;
pub const KEY_F13: u16 = 183;
pub const KEY_F14: u16 = 184;
pub const KEY_F15: u16 = 185;
pub const KEY_F16: u16 = 186;
pub const KEY_F17: u16 = 187;
pub const KEY_F18: u16 = 188;
pub const KEY_F19: u16 = 189;
pub const KEY_F20: u16 = 190;
pub const KEY_F21: u16 = 191;
pub const KEY_F22: u16 = 192;
pub const KEY_F23: u16 = 193;
pub const KEY_F24: u16 = 194;
pub const KEY_ALL_APPLICATIONS: u16 = 204;
pub const KEY_CLOSE: u16 = 206;
pub const KEY_PLAY: u16 = 207;
pub const KEY_FASTFORWARD: u16 = 208;
pub const KEY_BASSBOOST: u16 = 209;
pub const KEY_CAMERA: u16 = 212;
pub const KEY_CHAT: u16 = 216;
pub const KEY_SEARCH: u16 = 217;
pub const KEY_FINANCE: u16 = 219;
pub const KEY_CANCEL: u16 = 223;
pub const KEY_BRIGHTNESSDOWN: u16 = 224;
pub const KEY_BRIGHTNESSUP: u16 = 225;
pub const KEY_KBDILLUMTOGGLE: u16 = 228;
pub const KEY_KBDILLUMDOWN: u16 = 229;
pub const KEY_KBDILLUMUP: u16 = 230;
pub const KEY_SEND: u16 = 231;
pub const KEY_REPLY: u16 = 232;
pub const KEY_FORWARDMAIL: u16 = 233;
pub const KEY_SAVE: u16 = 234;
pub const KEY_DOCUMENTS: u16 = 235;
pub const KEY_VIDEO_NEXT: u16 = 241;
pub const KEY_BRIGHTNESS_AUTO: u16 = 244;
pub const BTN_MISC: u16 = 256;
pub const BTN_LEFT: u16 = 272;
pub const BTN_RIGHT: u16 = 273;
pub const BTN_MIDDLE: u16 = 274;
pub const KEY_SELECT: u16 = 353;
pub const KEY_GOTO: u16 = 354;
pub const KEY_INFO: u16 = 358;
pub const KEY_PROGRAM: u16 = 362;
pub const KEY_PVR: u16 = 366;
pub const KEY_SUBTITLE: u16 = 370;
pub const KEY_FULL_SCREEN: u16 = 372;
pub const KEY_KEYBOARD: u16 = 374;
pub const KEY_ASPECT_RATIO: u16 = 375;
pub const KEY_PC: u16 = 376;
pub const KEY_TV: u16 = 377;
pub const KEY_TV2: u16 = 378;
pub const KEY_VCR: u16 = 379;
pub const KEY_VCR2: u16 = 380;
pub const KEY_SAT: u16 = 381;
pub const KEY_CD: u16 = 383;
pub const KEY_TAPE: u16 = 384;
pub const KEY_TUNER: u16 = 386;
pub const KEY_PLAYER: u16 = 387;
pub const KEY_DVD: u16 = 389;
pub const KEY_AUDIO: u16 = 392;
pub const KEY_VIDEO: u16 = 393;
pub const KEY_MEMO: u16 = 396;
pub const KEY_CALENDAR: u16 = 397;
pub const KEY_RED: u16 = 398;
pub const KEY_GREEN: u16 = 399;
pub const KEY_YELLOW: u16 = 400;
pub const KEY_BLUE: u16 = 401;
pub const KEY_CHANNELUP: u16 = 402;
pub const KEY_CHANNELDOWN: u16 = 403;
pub const KEY_LAST: u16 = 405;
pub const KEY_NEXT: u16 = 407;
pub const KEY_RESTART: u16 = 408;
pub const KEY_SLOW: u16 = 409;
pub const KEY_SHUFFLE: u16 = 410;
pub const KEY_PREVIOUS: u16 = 412;
pub const KEY_VIDEOPHONE: u16 = 416;
pub const KEY_GAMES: u16 = 417;
pub const KEY_ZOOMIN: u16 = 418;
pub const KEY_ZOOMOUT: u16 = 419;
pub const KEY_ZOOMRESET: u16 = 420;
pub const KEY_WORDPROCESSOR: u16 = 421;
pub const KEY_EDITOR: u16 = 422;
pub const KEY_SPREADSHEET: u16 = 423;
pub const KEY_GRAPHICSEDITOR: u16 = 424;
pub const KEY_PRESENTATION: u16 = 425;
pub const KEY_DATABASE: u16 = 426;
pub const KEY_NEWS: u16 = 427;
pub const KEY_VOICEMAIL: u16 = 428;
pub const KEY_ADDRESSBOOK: u16 = 429;
pub const KEY_MESSENGER: u16 = 430;
pub const KEY_BRIGHTNESS_TOGGLE: u16 = 431;
pub const KEY_SPELLCHECK: u16 = 432;
pub const KEY_LOGOFF: u16 = 433;
pub const KEY_MEDIA_REPEAT: u16 = 439;
pub const KEY_IMAGES: u16 = 442;
pub const KEY_BUTTONCONFIG: u16 = 576;
pub const KEY_TASKMANAGER: u16 = 577;
pub const KEY_JOURNAL: u16 = 578;
pub const KEY_CONTROLPANEL: u16 = 579;
pub const KEY_APPSELECT: u16 = 580;
pub const KEY_SCREENSAVER: u16 = 581;
pub const KEY_VOICECOMMAND: u16 = 582;
pub const KEY_ASSISTANT: u16 = 583;
pub const KEY_KBD_LAYOUT_NEXT: u16 = 584;
pub const KEY_EMOJI_PICKER: u16 = 585;
pub const KEY_DICTATE: u16 = 586;
pub const KEY_CAMERA_ACCESS_ENABLE: u16 = 587;
pub const KEY_CAMERA_ACCESS_DISABLE: u16 = 588;
pub const KEY_CAMERA_ACCESS_TOGGLE: u16 = 589;
pub const KEY_BRIGHTNESS_MIN: u16 = 592;
pub const KEY_BRIGHTNESS_MAX: u16 = 593;
pub const KEY_KBDINPUTASSIST_PREV: u16 = 608;
pub const KEY_KBDINPUTASSIST_NEXT: u16 = 609;
pub const KEY_KBDINPUTASSIST_PREVGROUP: u16 = 610;
pub const KEY_KBDINPUTASSIST_NEXTGROUP: u16 = 611;
pub const KEY_KBDINPUTASSIST_ACCEPT: u16 = 612;
pub const KEY_KBDINPUTASSIST_CANCEL: u16 = 613;
